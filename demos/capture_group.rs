// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_pcre2::{bridge::regex_capture, Regex};

pub fn main() {
    typed();
    host();
}

fn typed() {
    let re =
        Regex::new(r"#(?<red>[\da-fA-F]{2})(?<green>[\da-fA-F]{2})(?<blue>[\da-fA-F]{2})").unwrap();
    let text = "The color is #ffbb33 and the background is #bbdd99.";

    // capture groups once
    if let Some(m) = re.captures(text).unwrap() {
        println!("Found match: {}", &m[0]);
        println!("Red: {}", &m["red"]);
        println!("Green: {}", &m["green"]);
        println!("Blue: {}", &m["blue"]);
    } else {
        println!("No match found");
    }

    // capture groups all
    for m in re.captures_iter(text) {
        let (whole, [red, green, blue]) = m.unwrap().extract();
        println!("Found match: {}, red: {}, green: {}, blue: {}", whole, red, green, blue);
    }
}

fn host() {
    // with two or more groups only the groups are returned
    if let Some(list) = regex_capture(r"^([ab]*s)\s*(.+?)$", "abbas kaviar") {
        println!("{:?}", list.as_slice());
    }
}
