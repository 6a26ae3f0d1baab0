//! Selectors and in-page extraction scripts
//!
//! The site keys its DOM by semantic data attributes rather than by
//! position, so extraction reads attribute-keyed maps instead of walking
//! fixed element paths. The selectors here are the extraction contract;
//! a site redesign that renames these attributes breaks the pipeline.

/// One listing card per job on a results page.
pub const JOB_CARD_SELECTOR: &str = r#"[data-card-type="JobCard"]"#;

/// The clickable title control inside a listing card. Activating it renders
/// the detail panel for that card's job.
pub const JOB_TITLE_SELECTOR: &str = r#"[data-card-type="JobCard"] [data-automation="jobTitle"]"#;

/// The expanded description panel, present only after a title click.
pub const DETAIL_PANEL_SELECTOR: &str = r#"[data-automation="jobAdDetails"]"#;

/// Reads the page-level total-jobs figure. Returns a number, or null when
/// the summary element is missing.
pub const TOTAL_JOBS_SCRIPT: &str = r#"
(() => {
    const el = document.querySelector('[data-automation="totalJobsCount"]');
    if (!el) return null;
    const n = Number(el.innerText.replace(/[^0-9]/g, ''));
    return Number.isFinite(n) ? n : null;
})()
"#;

/// Harvests every listing card in DOM order.
///
/// Each card contributes its `data-job-id` and a flat map of every nested
/// `data-automation`-tagged element's trimmed text, keyed by the attribute
/// value.
pub const JOB_CARDS_SCRIPT: &str = r#"
(() => {
    const cards = document.querySelectorAll('[data-card-type="JobCard"]');
    const out = [];
    cards.forEach((card) => {
        const entry = { id: card.dataset.jobId || "", fields: {} };
        card.querySelectorAll('[data-automation]').forEach((el) => {
            entry.fields[el.getAttribute('data-automation')] = el.innerText.trim();
        });
        out.push(entry);
    });
    return out;
})()
"#;

/// Reads the open detail panel's text. Returns null when no panel is
/// rendered, which callers treat as an item-level failure.
pub const DETAIL_TEXT_SCRIPT: &str = r#"
(() => {
    const panel = document.querySelector('[data-automation="jobAdDetails"]');
    return panel ? panel.innerText.trim() : null;
})()
"#;
