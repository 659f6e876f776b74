#![no_main]

use diffcore::Engine;
use libfuzzer_sys::fuzz_target;

#[derive(arbitrary::Arbitrary, Debug)]
struct Input<'a> {
    before: &'a [u8],
    after: &'a [u8],
    ignore_case: bool,
    ignore_blank_lines: bool,
}

fuzz_target!(|input: Input| {
    let before = String::from_utf8_lossy(input.before);
    let after = String::from_utf8_lossy(input.after);

    for name in ["myers", "patience", "histogram"] {
        let mut engine = Engine::new();
        engine
            .set_algorithm(name)
            .unwrap()
            .set_ignore_case(input.ignore_case)
            .set_ignore_blank_lines(input.ignore_blank_lines);

        if let Ok(result) = engine.diff(&before, &after) {
            let _ = result.to_unified_string();
            let _ = result.to_json();
        }
    }
});
