// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_pcre2::{
    bridge::{regex_replace_all, regex_replace_first},
    Regex,
};

pub fn main() {
    typed();
    host();
}

fn typed() {
    let re = Regex::new(r"(?<year>\d{4})-(?<month>\d{2})-(?<day>\d{2})").unwrap();
    let text = "released on 2025-04-22, patched on 2025-05-01.";

    println!("{}", re.replace(text, "${day}/${month}/${year}").unwrap());
    println!("{}", re.replace_all(text, "${day}/${month}/${year}").unwrap());
}

fn host() {
    println!("{}", regex_replace_all("a", "X", "banana").unwrap()); // bXnXnX
    println!("{}", regex_replace_first("a", "X", "banana").unwrap()); // bXnana
}
