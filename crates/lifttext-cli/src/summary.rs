use std::path::Path;

use console::Style;
use lifttext_core::ocr::{psm_label, OcrConfig, OcrOutcome};
use lifttext_core::words::WordEntry;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
    muted: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold(),
            path: Style::new().underlined(),
            muted: Style::new().dim().yellow(),
        }
    }
}

/// Header on stderr, recognized text on stdout so it can be piped.
pub fn print_outcome(
    input: &Path,
    page: Option<(usize, usize)>,
    config: &OcrConfig,
    outcome: &OcrOutcome,
) {
    let s = Styles::new();

    eprintln!();
    eprintln!("  {}", s.title.apply_to("LiftText OCR"));
    eprintln!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    eprintln!(
        "  {:<12}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    if let Some((current, total)) = page {
        eprintln!(
            "  {:<12}{}",
            s.label.apply_to("Page"),
            s.value.apply_to(format!("{current} of {total}"))
        );
    }
    let region = match outcome.crop {
        Some(rect) => rect.to_string(),
        None => "full image".to_string(),
    };
    eprintln!("  {:<12}{}", s.label.apply_to("Region"), s.value.apply_to(region));
    eprintln!(
        "  {:<12}{}",
        s.label.apply_to("Language"),
        s.value.apply_to(&config.language)
    );
    eprintln!(
        "  {:<12}{}",
        s.label.apply_to("Mode"),
        s.value
            .apply_to(format!("{} ({})", config.psm, psm_label(config.psm)))
    );
    eprintln!(
        "  {:<12}{}",
        s.label.apply_to("Words"),
        s.value.apply_to(outcome.words.len())
    );
    eprintln!();

    if outcome.found_text() {
        println!("{}", outcome.text);
    } else {
        eprintln!("  {}", s.muted.apply_to(&outcome.text));
    }
}

/// One row per word: index, confidence, bounding box in image pixels, text.
pub fn print_words(words: &[WordEntry]) {
    if words.is_empty() {
        return;
    }
    println!();
    println!("{:>5}  {:>8}  {:<22}  Text", "#", "Conf", "Box");
    println!("{}", "-".repeat(50));
    for word in words {
        println!(
            "{:>5}  {:>8}  {:<22}  {}",
            word.index,
            word.confidence_label(),
            bounding_box(word).unwrap_or_else(|| "-".to_string()),
            word.text
        );
    }
}

fn bounding_box(word: &WordEntry) -> Option<String> {
    let polygon = word.polygon.as_ref().filter(|p| !p.is_empty())?;
    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
    for &[x, y] in polygon {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    Some(format!(
        "{:.0}x{:.0} at ({:.0}, {:.0})",
        max_x - min_x,
        max_y - min_y,
        min_x,
        min_y
    ))
}
