pub mod render;
pub mod valuation;

pub use render::{render, render_csv, render_markdown, render_plain_text, ReportFormat};
pub use valuation::{
    build_report, generate_report, PeerExplanation, PeerTableRow, ReportInput, ValuationReport,
};
