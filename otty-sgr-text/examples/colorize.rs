//! Print the color spans found in a few colored strings.
//!
//! An optional JSON configuration file can be passed as first argument.
use otty_sgr::SgrConfig;
use otty_sgr_text::{ColorfulTextParser, Mode};

const SAMPLES: &[&str] = &[
    "hello",
    // 3/4-bit colors
    "\x1b[31mhello\x1b[0m",
    "\x1b[0;32mhello\x1b[0m",
    "\x1b[1;33mhello\x1b[0m",
    "\x1b[31;42mhello\x1b[0m",
    "\x1b[1;32;43mhello\x1b[0m",
    "\x1b[1;34;40mhello",
    "hell\x1b[31;43mo\x1b[0m",
    // 8-bit colors
    "\x1b[38;5;160mhello\x1b[m",
    "\x1b[0;38;5;160;48;5;19mhello\x1b[m",
    "\x1b[1;38;5;36mhello\x1b[m",
    // 24-bit colors
    "\x1b[38;2;215;0;0mhello\x1b[m",
    "\x1b[0;38;2;215;0;0;48;2;95;135;175mhello\x1b[m",
    "\x1b[1;38;2;95;135;175;48;2;215;0;0mhello\x1b[m",
];

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SgrConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SgrConfig::default(),
    };

    for mode in [Mode::AllText, Mode::MarkedText] {
        println!("{mode:?}");
        let mut parser = ColorfulTextParser::from_config(&config);
        for (idx, sample) in SAMPLES.iter().enumerate() {
            let text = parser.parse(sample, mode);
            println!("{idx:02}: {:?}", text.text);
            for span in &text.spans {
                println!(
                    "    [{}..{}) front {} back {}",
                    span.start,
                    span.end(),
                    span.color.front,
                    span.color.back
                );
            }
        }
    }

    Ok(())
}
