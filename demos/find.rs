// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_pcre2::{bridge::regex_find_matches, Regex};

pub fn main() {
    typed();
    host();
}

fn typed() {
    let re = Regex::new(r"#[\da-fA-F]{6}").unwrap();
    let text = "The color is #ffbb33 and the background is #bbdd99.";

    // find one
    if let Some(m) = re.find(text).unwrap() {
        println!("Found match: {} at {:?}", m.as_str(), m.range());
    } else {
        println!("No match found");
    }

    // find all
    for m in re.find_iter(text) {
        println!("Found match: {}", m.unwrap().as_str());
    }
}

fn host() {
    // the same search through the host operations, empty matches included
    for list in regex_find_matches("a*", "banana", 0) {
        println!("{:?}", list.as_slice());
    }
}
