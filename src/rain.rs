//! Falling-letter rain initializer.
//!
//! A run reads the container's rendered width, plans `floor(width /
//! column_width)` columns and appends one column element per slot. Each
//! column holds the word's letters in order and gets its own randomized
//! animation duration and delay; the CSS animation itself lives in the page
//! stylesheet and is keyed off the column / letter class names.
//!
//! Planning is pure (`plan_columns`) so it runs on the host; `RainTarget` is
//! the seam between the plan and whatever container receives it.

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, window};

use crate::config::RainConfig;
use crate::error::RainError;
use crate::rng::{RandomSource, SeededRandom, uniform};

// --- Planning ---------------------------------------------------------------

/// One planned rain column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSpec {
    pub index: usize,
    /// CSS `left` offset in pixels (`index * column_width`).
    pub left_px: u64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub letters: Vec<char>,
}

impl ColumnSpec {
    /// Inline style properties applied to the column element.
    pub fn style_properties(&self) -> [(&'static str, String); 3] {
        [
            ("left", format!("{}px", self.left_px)),
            ("animation-duration", format!("{}s", self.duration_s)),
            ("animation-delay", format!("{}s", self.delay_s)),
        ]
    }

    pub fn inline_style(&self) -> String {
        self.style_properties()
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Number of whole columns that fit `width`. Negative or non-finite widths give 0.
pub fn column_count(width: f64, column_width: u32) -> usize {
    if column_width == 0 || !width.is_finite() || width <= 0.0 {
        return 0;
    }
    (width / column_width as f64).floor() as usize
}

/// Plan all columns for a container of the given width. Each column draws
/// its duration first and then its delay.
pub fn plan_columns<R: RandomSource + ?Sized>(
    width: f64,
    config: &RainConfig,
    rng: &mut R,
) -> Vec<ColumnSpec> {
    let letters: Vec<char> = config.word.chars().collect();
    (0..column_count(width, config.column_width))
        .map(|index| ColumnSpec {
            index,
            left_px: index as u64 * config.column_width as u64,
            duration_s: uniform(rng, config.duration_min_s, config.duration_max_s),
            delay_s: uniform(rng, config.delay_min_s, config.delay_max_s),
            letters: letters.clone(),
        })
        .collect()
}

// --- Container seam ---------------------------------------------------------

/// Anything that can receive rain columns.
pub trait RainTarget {
    /// Current rendered width in CSS pixels.
    fn rendered_width(&self) -> f64;
    /// Remove every child of the container.
    fn clear(&mut self) -> Result<(), RainError>;
    /// Append a column (and its letters) after the existing children.
    fn append_column(&mut self, column: &ColumnSpec, config: &RainConfig) -> Result<(), RainError>;
}

/// Outcome of a populate run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RainSummary {
    pub columns: usize,
    pub letters_per_column: usize,
}

/// Validate `config`, optionally clear `target`, then append one column per
/// slot. Without `clear_before`, repeated calls accumulate column sets.
pub fn populate<T, R>(target: &mut T, config: &RainConfig, rng: &mut R) -> Result<RainSummary, RainError>
where
    T: RainTarget + ?Sized,
    R: RandomSource + ?Sized,
{
    config.validate()?;
    if config.clear_before {
        target.clear()?;
    }
    let width = target.rendered_width();
    let columns = plan_columns(width, config, rng);
    for column in &columns {
        target.append_column(column, config)?;
    }
    let summary = RainSummary {
        columns: columns.len(),
        letters_per_column: config.word.chars().count(),
    };
    debug!(width, columns = summary.columns, container = %config.container_id, "rain populated");
    Ok(summary)
}

// --- DOM container ----------------------------------------------------------

/// A page element located by id.
pub struct DomContainer {
    document: Document,
    element: HtmlElement,
}

impl DomContainer {
    pub fn find(document: &Document, id: &str) -> Result<Self, RainError> {
        let Some(el) = document.get_element_by_id(id) else {
            warn!(id, "rain container missing");
            return Err(RainError::MissingContainer { id: id.to_string() });
        };
        let element = el
            .dyn_into::<HtmlElement>()
            .map_err(|_| RainError::NotHtmlElement { id: id.to_string() })?;
        Ok(Self { document: document.clone(), element })
    }

    fn create_html(&self, tag: &str) -> Result<HtmlElement, RainError> {
        self.document
            .create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| RainError::Dom(format!("<{tag}> is not an HTMLElement")))
    }
}

impl RainTarget for DomContainer {
    fn rendered_width(&self) -> f64 {
        self.element.offset_width() as f64
    }

    fn clear(&mut self) -> Result<(), RainError> {
        self.element.set_text_content(None);
        Ok(())
    }

    fn append_column(&mut self, column: &ColumnSpec, config: &RainConfig) -> Result<(), RainError> {
        let col = self.create_html(&config.column_tag)?;
        col.set_class_name(&config.column_class);
        let style = col.style();
        for (name, value) in column.style_properties() {
            style.set_property(name, &value)?;
        }
        let mut buf = [0u8; 4];
        for &ch in &column.letters {
            let span = self.create_html(&config.letter_tag)?;
            span.set_class_name(&config.letter_class);
            span.set_text_content(Some(&*ch.encode_utf8(&mut buf)));
            col.append_child(&span)?;
        }
        self.element.append_child(&col)?;
        Ok(())
    }
}

// --- Browser entry ----------------------------------------------------------

fn document() -> Result<Document, RainError> {
    let win = window().ok_or(RainError::NoWindow)?;
    win.document().ok_or(RainError::NoDocument)
}

/// Populate the configured container of the current page.
pub fn start_rain(config: &RainConfig) -> Result<RainSummary, RainError> {
    let doc = document()?;
    let mut container = DomContainer::find(&doc, &config.container_id)?;
    let mut rng = SeededRandom::from_entropy();
    populate(&mut container, config, &mut rng)
}

/// Remove all rain columns from the container with the given id.
pub fn clear_rain(container_id: &str) -> Result<(), RainError> {
    let doc = document()?;
    DomContainer::find(&doc, container_id)?.clear()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_floors_width() {
        assert_eq!(column_count(0.0, 60), 0);
        assert_eq!(column_count(59.9, 60), 0);
        assert_eq!(column_count(60.0, 60), 1);
        assert_eq!(column_count(125.0, 60), 2);
        assert_eq!(column_count(600.0, 60), 10);
    }

    #[test]
    fn column_count_ignores_degenerate_widths() {
        assert_eq!(column_count(-120.0, 60), 0);
        assert_eq!(column_count(f64::NAN, 60), 0);
        assert_eq!(column_count(f64::INFINITY, 60), 0);
        assert_eq!(column_count(600.0, 0), 0);
    }

    #[test]
    fn plan_offsets_letters_and_timing() {
        let cfg = RainConfig::default();
        let mut rng = SeededRandom::new(42);
        let plan = plan_columns(600.0, &cfg, &mut rng);
        assert_eq!(plan.len(), 10);
        for (i, col) in plan.iter().enumerate() {
            assert_eq!(col.index, i);
            assert_eq!(col.left_px, i as u64 * 60);
            assert_eq!(col.letters.iter().collect::<String>(), "ZENCHAIN");
            assert!((5.0..10.0).contains(&col.duration_s), "duration {}", col.duration_s);
            assert!((0.0..5.0).contains(&col.delay_s), "delay {}", col.delay_s);
        }
    }

    #[test]
    fn plans_differ_between_seeds() {
        let cfg = RainConfig::default();
        let a = plan_columns(600.0, &cfg, &mut SeededRandom::new(1));
        let b = plan_columns(600.0, &cfg, &mut SeededRandom::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn inline_style_formats_px_and_seconds() {
        let col = ColumnSpec {
            index: 2,
            left_px: 120,
            duration_s: 7.5,
            delay_s: 0.25,
            letters: vec!['Z'],
        };
        assert_eq!(
            col.inline_style(),
            "left: 120px; animation-duration: 7.5s; animation-delay: 0.25s;"
        );
    }

    #[test]
    fn multibyte_word_is_split_by_character() {
        let cfg = RainConfig { word: "雨ZEN".into(), ..RainConfig::default() };
        let plan = plan_columns(60.0, &cfg, &mut SeededRandom::new(3));
        assert_eq!(plan[0].letters, vec!['雨', 'Z', 'E', 'N']);
    }
}
