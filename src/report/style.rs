//! Report Styles Module
//! Fixed palette and cell format constructors for the workbook sections.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

// Palette
pub(crate) const NAVY: Color = Color::RGB(0x2C3E50); // Banner, table headers
pub(crate) const SLATE: Color = Color::RGB(0x34495E); // Subtitle band
pub(crate) const POSITIVE: Color = Color::RGB(0x27AE60); // Profit accents
pub(crate) const WARNING: Color = Color::RGB(0xE74C3C); // Cost accents
pub(crate) const NEUTRAL: Color = Color::RGB(0x3498DB); // Revenue, counts
pub(crate) const SALES_ORANGE: Color = Color::RGB(0xF39C12); // Sales status rows
pub(crate) const HEADING_BG: Color = Color::RGB(0xF2F4F4); // Section headings
pub(crate) const FOOTER_GRAY: Color = Color::RGB(0x7F8C8D);
pub(crate) const SCALE_LOW: Color = Color::RGB(0xFFEEEE); // Color scale min
pub(crate) const SCALE_MID: Color = Color::RGB(0xFFFFFF);
pub(crate) const SCALE_HIGH: Color = Color::RGB(0xEEFFEE); // Color scale max

/// Fill accent assigned to a KPI card when the card is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CardAccent {
    Positive,
    Warning,
    Neutral,
}

impl CardAccent {
    fn fill(self) -> Color {
        match self {
            CardAccent::Positive => POSITIVE,
            CardAccent::Warning => WARNING,
            CardAccent::Neutral => NEUTRAL,
        }
    }
}

/// Status tag of a detail-table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowStatus {
    Base,
    Cost,
    Profit,
    Sales,
    Revenue,
    Stock,
}

impl RowStatus {
    pub(crate) fn label(self) -> &'static str {
        match self {
            RowStatus::Base => "Base",
            RowStatus::Cost => "Custo",
            RowStatus::Profit => "Lucro",
            RowStatus::Sales => "Vendas",
            RowStatus::Revenue => "Receita",
            RowStatus::Stock => "Estoque",
        }
    }

    /// Highlight fill, where the status carries one.
    fn fill(self) -> Option<Color> {
        match self {
            RowStatus::Profit => Some(POSITIVE),
            RowStatus::Cost => Some(WARNING),
            RowStatus::Revenue => Some(NEUTRAL),
            RowStatus::Sales => Some(SALES_ORANGE),
            RowStatus::Base | RowStatus::Stock => None,
        }
    }
}

/// Font emphasis of a trend narrative cell, carried by the tier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Emphasis {
    None,
    Positive,
    Warning,
}

pub(crate) fn banner() -> Format {
    Format::new()
        .set_font_size(18)
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(NAVY)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

pub(crate) fn subtitle() -> Format {
    Format::new()
        .set_font_size(11)
        .set_italic()
        .set_font_color(Color::White)
        .set_background_color(SLATE)
        .set_align(FormatAlign::Center)
}

pub(crate) fn section_heading() -> Format {
    Format::new()
        .set_font_size(14)
        .set_bold()
        .set_font_color(NAVY)
        .set_background_color(HEADING_BG)
        .set_border(FormatBorder::Thin)
}

pub(crate) fn kpi_card(accent: CardAccent) -> Format {
    Format::new()
        .set_font_size(12)
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(accent.fill())
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

pub(crate) fn table_header() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(NAVY)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
}

pub(crate) fn cell_left() -> Format {
    Format::new()
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Thin)
}

pub(crate) fn cell_center() -> Format {
    Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
}

/// Bordered cell with default alignment, used by the chart data block.
pub(crate) fn cell_plain() -> Format {
    Format::new().set_border(FormatBorder::Thin)
}

/// Monetary detail cells stay numeric and carry the BRL number format.
pub(crate) fn currency_cell() -> Format {
    cell_left().set_num_format("R$ #,##0.00")
}

pub(crate) fn status_cell(status: RowStatus) -> Format {
    let format = cell_center();
    match status.fill() {
        Some(color) => format
            .set_background_color(color)
            .set_bold()
            .set_font_color(Color::White),
        None => format,
    }
}

pub(crate) fn trend_label() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Thin)
}

pub(crate) fn trend_text() -> Format {
    Format::new()
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Thin)
}

pub(crate) fn trend_narrative(emphasis: Emphasis) -> Format {
    let format = trend_text();
    match emphasis {
        Emphasis::Positive => format.set_bold().set_font_color(POSITIVE),
        Emphasis::Warning => format.set_bold().set_font_color(WARNING),
        Emphasis::None => format,
    }
}

pub(crate) fn footer() -> Format {
    Format::new()
        .set_font_size(9)
        .set_italic()
        .set_font_color(FOOTER_GRAY)
        .set_align(FormatAlign::Center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_display_names() {
        assert_eq!(RowStatus::Base.label(), "Base");
        assert_eq!(RowStatus::Cost.label(), "Custo");
        assert_eq!(RowStatus::Profit.label(), "Lucro");
        assert_eq!(RowStatus::Sales.label(), "Vendas");
        assert_eq!(RowStatus::Revenue.label(), "Receita");
        assert_eq!(RowStatus::Stock.label(), "Estoque");
    }

    #[test]
    fn only_base_and_stock_rows_are_unfilled() {
        assert!(RowStatus::Base.fill().is_none());
        assert!(RowStatus::Stock.fill().is_none());
        assert_eq!(RowStatus::Profit.fill(), Some(POSITIVE));
        assert_eq!(RowStatus::Cost.fill(), Some(WARNING));
        assert_eq!(RowStatus::Revenue.fill(), Some(NEUTRAL));
        assert_eq!(RowStatus::Sales.fill(), Some(SALES_ORANGE));
    }
}
