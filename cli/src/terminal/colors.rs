use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const PORTS: Color = Color::Green;
pub const CPES: Color = Color::Yellow;
pub const VULNERABILITIES: Color = Color::Red;
pub const HOSTNAMES: Color = Color::Blue;
pub const TAGS: Color = Color::Magenta;
