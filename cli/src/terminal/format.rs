use colored::*;
use ipintel_common::config::Config;
use ipintel_core::output::{Category, Painter, PlainPainter};

use crate::terminal::colors;

/// Colors each category with its ANSI color.
pub struct AnsiPainter;

impl Painter for AnsiPainter {
    fn paint(&self, category: Category, text: &str) -> String {
        text.color(category_color(category)).to_string()
    }
}

pub fn category_color(category: Category) -> Color {
    match category {
        Category::Ports => colors::PORTS,
        Category::Cpes => colors::CPES,
        Category::Vulnerabilities => colors::VULNERABILITIES,
        Category::Hostnames => colors::HOSTNAMES,
        Category::Tags => colors::TAGS,
    }
}

pub fn painter_for(cfg: &Config) -> Box<dyn Painter> {
    if cfg.no_color {
        Box::new(PlainPainter)
    } else {
        Box::new(AnsiPainter)
    }
}
