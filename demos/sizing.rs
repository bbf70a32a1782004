// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Usage:
//
// RUST_LOG=trace cargo run --example sizing -- '(?<year>\d{4})-\k<year>'

use renode::{scan_nodes, Regex};

pub fn main() {
    env_logger::init();

    let pattern = std::env::args()
        .nth(1)
        .unwrap_or_else(|| r"^(?<year>\d{4})-(\d{2})-\g{-1}$".to_owned());

    let nodes = match scan_nodes(pattern.as_bytes()) {
        Ok(nodes) => nodes,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    for node in &nodes {
        println!(
            "{:>4}..{:<4} {:<28} {}",
            node.range.index,
            node.range.end(),
            node.kind.to_string(),
            String::from_utf8_lossy(node.range.slice(pattern.as_bytes()))
        );
    }

    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!(
        "node buffer: {} bytes, {} nodes, {} capture groups",
        re.size(),
        re.node_count(),
        re.capture_group_count()
    );
}
