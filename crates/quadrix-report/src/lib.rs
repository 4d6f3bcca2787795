//! quadrix-report: HTML rendering of score reports.

pub mod html;
