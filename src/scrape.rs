// src/scrape.rs
//
// The scrape pipeline: fetch directory → locate → (fetch profiles) → normalize.
// Sequential and blocking; callers in async code run it on a blocking thread.

use std::thread;

use tracing::{debug, info, warn};

use crate::{
    config::ScrapeOptions,
    core::Fetch,
    error::FetchError,
    member::MemberRecord,
    normalize::Normalizer,
    progress::Progress,
    specs::{Locator, Page, RawRecord},
};

/// Outcome of one run.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub members: Vec<MemberRecord>,
    /// Strategy that produced the records, if any did.
    pub strategy: Option<&'static str>,
    pub located: usize,
    pub discarded: usize,
    pub failed_pages: usize,
}

/// Scrape the whole directory.
///
/// Only a failure to fetch the directory page itself is an error; profile
/// pages that cannot be fetched are skipped and counted.
pub fn collect_members(
    opts: &ScrapeOptions,
    fetcher: &dyn Fetch,
    normalizer: &Normalizer,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ScrapeReport, FetchError> {
    let url = opts.members_url();
    info!("Starting member scrape of {url}");
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching {url}"));
    }

    let body = fetcher.fetch(&url).inspect_err(|e| {
        warn!("Failed to fetch main directory page: {e}");
    })?;
    let page = Page::parse(url, &body);

    let mut report = ScrapeReport::default();
    let Some(located) = Locator::default().locate(&page) else {
        if let Some(p) = progress.as_deref_mut() { p.finish(); }
        return Ok(report);
    };
    report.strategy = Some(located.strategy);
    report.located = located.records.len();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(report.located);
    }

    for (i, raw) in located.records.into_iter().enumerate() {
        let normalized = match raw {
            RawRecord::Json(obj) => normalizer.from_json(&obj),
            RawRecord::Card { html, profile_url } => normalizer.from_card(&html, profile_url.as_deref()),
            RawRecord::ProfileLink(link) => {
                info!("Scraping member {}/{}: {}", i + 1, report.located, link);
                let body = match fetcher.fetch(&link) {
                    Ok(b) => b,
                    Err(e) => {
                        warn!("Failed to fetch member page: {e}");
                        report.failed_pages += 1;
                        if let Some(p) = progress.as_deref_mut() { p.item_failed(&link); }
                        continue;
                    }
                };
                pause(opts);
                let profile = Page::parse(link.as_str(), &body);
                normalizer.from_profile(&profile.doc, &link)
            }
        };

        match normalized {
            Ok(member) => {
                debug!("Parsed member: {}", member.name);
                if let Some(p) = progress.as_deref_mut() { p.item_done(&member.name); }
                report.members.push(member);
            }
            Err(discard) => {
                debug!("{discard}");
                report.discarded += 1;
                if let Some(p) = progress.as_deref_mut() { p.item_failed(discard.source_kind); }
            }
        }
    }

    info!(
        "Scraping completed via {}: {} member(s), {} discarded, {} page(s) failed",
        located.strategy, report.members.len(), report.discarded, report.failed_pages
    );
    if let Some(p) = progress.as_deref_mut() { p.finish(); }
    Ok(report)
}

/// Politeness delay between profile fetches.
fn pause(opts: &ScrapeOptions) {
    let d = opts.request_pause();
    if !d.is_zero() { thread::sleep(d); }
}
