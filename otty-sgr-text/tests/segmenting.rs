use otty_sgr::{Color, Rgb, SgrConfig, TextAttribute};
use otty_sgr_text::{ColorSpan, ColorfulTextParser, Mode};

const RED: Rgb = Rgb::new(222, 56, 43);
const GREEN: Rgb = Rgb::new(57, 181, 74);
const YELLOW: Rgb = Rgb::new(255, 199, 6);

fn span(color: Color, start: usize, len: usize) -> ColorSpan {
    ColorSpan { color, start, len }
}

#[test]
fn all_text_spans_cover_every_byte() {
    let mut parser = ColorfulTextParser::default();
    let text = parser.parse("hell\x1b[31;43mo\x1b[0m!", Mode::AllText);
    let base = Color::default();

    assert_eq!(text.text, "hello!");
    assert_eq!(
        text.spans,
        vec![
            span(base, 0, 4),
            span(Color::new(RED, YELLOW), 4, 1),
            span(base, 5, 1),
        ]
    );

    let covered: usize = text.spans.iter().map(|span| span.len).sum();
    assert_eq!(covered, text.text.len());
}

#[test]
fn marked_text_only_reports_custom_runs() {
    let mut parser = ColorfulTextParser::default();
    let text = parser.parse("a\x1b[32mb\x1b[0mc\x1b[1md", Mode::MarkedText);

    assert_eq!(text.text, "abcd");
    assert_eq!(
        text.spans,
        vec![span(Color::new(GREEN, Color::default().back), 1, 1)]
    );
}

#[test]
fn invalid_sequence_keeps_attribute() {
    let mut parser = ColorfulTextParser::default();
    let text = parser.parse("\x1b[31mx\x1b[38;5;999my", Mode::AllText);

    assert_eq!(text.text, "xy");
    assert!(text.spans.iter().all(|span| span.color.front == RED));
}

#[test]
fn lines_share_the_current_attribute() {
    let mut parser = ColorfulTextParser::default();
    let lines = parser.parse_lines(
        &["\x1b[1;34;40mhello", "world", "\x1b[mdone"],
        Mode::MarkedText,
    );

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].spans, lines[1].spans);
    assert_eq!(lines[1].spans[0].color.front, Rgb::new(0, 111, 184));
    assert!(lines[2].spans.is_empty());
    assert!(!parser.current_attr().is_custom());
}

#[test]
fn config_supplies_default_and_initial_attribute() -> anyhow::Result<()> {
    let config = SgrConfig::from_json(
        r##"{
            "default_attr": { "color": { "front": "#ffffff", "back": "#000000" } },
            "initial_attr": { "state": "custom", "color": { "front": "#00ff00" } }
        }"##,
    )?;
    let mut parser = ColorfulTextParser::from_config(&config);

    let text = parser.parse("a\x1b[0mb", Mode::AllText);

    assert_eq!(text.spans[0].color.front, Rgb::new(0, 255, 0));
    assert_eq!(
        text.spans[1].color,
        Color::new(Rgb::gray(255), Rgb::gray(0))
    );
    assert_eq!(*parser.current_attr(), TextAttribute::with_default(config.default_attr.color));
    Ok(())
}
