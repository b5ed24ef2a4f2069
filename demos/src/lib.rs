//! Alsvid Demo Suite
//!
//! Small binaries exercising the circuit-template library end to end:
//!
//! - **demo-ryrz**: build, inspect, and serialize the RYRZ template
//! - **demo-entanglement**: print the connection lists of the named
//!   entanglement topologies

use console::style;

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a labeled result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {value}", style(format!("{label}:")).bold());
}
