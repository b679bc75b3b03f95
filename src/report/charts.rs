//! Chart Construction Module
//! Builds the embedded pie and column charts against written cell ranges.

use rust_xlsxwriter::{Chart, ChartPoint, ChartSolidFill, ChartType};

use super::style;
use super::SHEET_NAME;

// 15 × 10 cm and 20 × 10 cm at 96 dpi.
const PIE_WIDTH: u32 = 567;
const COLUMN_WIDTH: u32 = 756;
const CHART_HEIGHT: u32 = 378;

/// Cost vs profit distribution pie, fed by the three-row block starting at
/// `header_row` (header, cost row, profit row). Slice colors are fixed:
/// cost red, profit green, regardless of relative magnitude.
pub(crate) fn cost_profit_pie(header_row: u32) -> Chart {
    let first = header_row + 1;
    let last = header_row + 2;

    let points = [
        ChartPoint::new().set_format(ChartSolidFill::new().set_color(style::WARNING)),
        ChartPoint::new().set_format(ChartSolidFill::new().set_color(style::POSITIVE)),
    ];

    let mut chart = Chart::new(ChartType::Pie);
    chart
        .add_series()
        .set_categories((SHEET_NAME, first, 0, last, 0))
        .set_values((SHEET_NAME, first, 1, last, 1))
        .set_name((SHEET_NAME, header_row, 1))
        .set_points(&points);
    chart.title().set_name("Distribuição Custo vs Lucro");
    chart.set_width(PIE_WIDTH).set_height(CHART_HEIGHT);
    chart
}

/// Revenue/cost/profit comparison column chart, fed by the four-row
/// indicator block starting at `header_row`.
pub(crate) fn comparison_column(header_row: u32) -> Chart {
    let first = header_row + 1;
    let last = header_row + 3;

    let mut chart = Chart::new(ChartType::Column);
    chart
        .add_series()
        .set_categories((SHEET_NAME, first, 0, last, 0))
        .set_values((SHEET_NAME, first, 1, last, 1))
        .set_name((SHEET_NAME, header_row, 1));
    chart.title().set_name("Análise Comparativa");
    chart.x_axis().set_name("Categorias");
    chart.y_axis().set_name("Valor (R$)");
    chart.set_width(COLUMN_WIDTH).set_height(CHART_HEIGHT);
    chart
}
