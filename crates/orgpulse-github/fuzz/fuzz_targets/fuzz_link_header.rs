#![no_main]

use libfuzzer_sys::fuzz_target;
use orgpulse_github::pagination::parse_next_link;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = std::str::from_utf8(data)
        && let Some(next) = parse_next_link(header)
    {
        assert!(!next.is_empty());
        assert!(header.contains(next.as_str()));
    }
});
