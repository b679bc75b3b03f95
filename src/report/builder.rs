//! Report Builder Module
//! Assembles the monthly performance workbook section by section.
//!
//! Sections are stacked top to bottom through a [`LayoutCursor`]: each
//! emitting step claims the rows it writes and leaves the cursor past its
//! own gap, so a section never needs to know how tall the previous one was.

use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{
    ConditionalFormat3ColorScale, DocProperties, Workbook, Worksheet, XlsxError,
};
use thiserror::Error;

use super::charts;
use super::metrics::{ratio_pct, MarginTier, SalesMetrics, SalesRecord, TurnoverTier};
use super::style::{self, CardAccent, Emphasis, RowStatus};
use super::SHEET_NAME;
use crate::currency::{format_brl, format_count};

const COL_FIRST: u16 = 0;
const COL_LAST: u16 = 5;
const COLUMN_WIDTHS: [(u16, f64); 6] = [
    (0, 25.0),
    (1, 20.0),
    (2, 15.0),
    (3, 15.0),
    (4, 20.0),
    (5, 15.0),
];
/// Rows reserved below the chart data block for the two anchored charts.
const CHART_AREA_ROWS: u32 = 10;

const REPORT_TITLE: &str = "📊 RELATÓRIO DE DESEMPENHO COMERCIAL";
const FOOTER_TEXT: &str =
    "Relatório gerado automaticamente pelo sistema de gestão - Todos os direitos reservados";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Build the report stamped with the current local time.
pub fn build_report(record: &SalesRecord) -> Result<Vec<u8>, ReportError> {
    build_report_at(record, Local::now().naive_local())
}

/// Build the report with an explicit generation timestamp. Identical record
/// and timestamp produce identical workbook content.
pub fn build_report_at(
    record: &SalesRecord,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&generated_at.and_utc()));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    for (col, width) in COLUMN_WIDTHS {
        worksheet.set_column_width(col, width)?;
    }

    let mut writer = ReportWriter {
        worksheet,
        cursor: LayoutCursor::new(),
        record,
        metrics: SalesMetrics::from_record(record),
        generated_at,
        kpi_first_row: 0,
        detail_last_row: 0,
    };
    writer.render()?;

    Ok(workbook.save_to_buffer()?)
}

/// Tracks the next free row while sections are appended top to bottom.
struct LayoutCursor {
    row: u32,
}

impl LayoutCursor {
    fn new() -> Self {
        Self { row: 0 }
    }

    fn row(&self) -> u32 {
        self.row
    }

    /// Claim the current row and move past it.
    fn take(&mut self) -> u32 {
        let row = self.row;
        self.row += 1;
        row
    }

    /// Leave `count` blank rows before the next section.
    fn skip(&mut self, count: u32) {
        self.row += count;
    }
}

/// One row of the detail table.
struct DetailRow {
    metric: &'static str,
    value: f64,
    unit: Unit,
    pct: String,
    status: RowStatus,
    note: &'static str,
}

#[derive(Clone, Copy)]
enum Unit {
    Currency,
    Count,
}

impl Unit {
    fn label(self) -> &'static str {
        match self {
            Unit::Currency => "R$",
            Unit::Count => "un",
        }
    }
}

struct ReportWriter<'a> {
    worksheet: &'a mut Worksheet,
    cursor: LayoutCursor,
    record: &'a SalesRecord,
    metrics: SalesMetrics,
    generated_at: NaiveDateTime,
    /// First KPI card row, recorded for the value color scale.
    kpi_first_row: u32,
    /// Last detail-table row, recorded for the value color scale.
    detail_last_row: u32,
}

impl ReportWriter<'_> {
    fn render(&mut self) -> Result<(), XlsxError> {
        self.write_banner()?;
        self.write_kpi_cards()?;
        self.write_detail_table()?;
        self.write_chart_section()?;
        self.write_trends()?;
        self.write_footer()?;
        self.apply_value_color_scale()
    }

    fn write_banner(&mut self) -> Result<(), XlsxError> {
        let row = self.cursor.take();
        self.worksheet
            .merge_range(row, COL_FIRST, row, COL_LAST, REPORT_TITLE, &style::banner())?;
        self.worksheet.set_row_height(row, 35)?;

        let row = self.cursor.take();
        let subtitle = format!(
            "Período: {} | Produto: {} | Gerado em: {}",
            self.record.period,
            self.record.item,
            self.generated_at.format("%d/%m/%Y %H:%M"),
        );
        self.worksheet
            .merge_range(row, COL_FIRST, row, COL_LAST, &subtitle, &style::subtitle())?;

        self.cursor.skip(1);
        Ok(())
    }

    fn write_kpi_cards(&mut self) -> Result<(), XlsxError> {
        let row = self.cursor.take();
        self.worksheet.merge_range(
            row,
            0,
            row,
            2,
            "📈 INDICADORES PRINCIPAIS",
            &style::section_heading(),
        )?;

        let m = &self.metrics;
        let cards = [
            (
                format!("📦 Receita Total: {}", format_brl(m.total_revenue)),
                CardAccent::Neutral,
            ),
            (
                format!("💰 Lucro Total: {}", format_brl(m.total_profit)),
                CardAccent::Positive,
            ),
            (
                format!("📊 Margem de Lucro: {:.1}%", m.profit_margin_pct),
                CardAccent::Positive,
            ),
            (
                format!("🏭 Custo Total: {}", format_brl(m.total_cost)),
                CardAccent::Warning,
            ),
            (
                format!(
                    "📋 Unidades Vendidas: {}",
                    format_count(self.record.units_sold)
                ),
                CardAccent::Neutral,
            ),
            (
                format!(
                    "📦 Estoque Restante: {} ({:.0}% vendido)",
                    format_count(m.remaining_stock),
                    m.sell_through_pct
                ),
                CardAccent::Neutral,
            ),
        ];

        // Two cards per row, each spanning three columns.
        self.kpi_first_row = self.cursor.row();
        for pair in cards.chunks(2) {
            let row = self.cursor.take();
            for (slot, (text, accent)) in pair.iter().enumerate() {
                let first_col = slot as u16 * 3;
                self.worksheet.merge_range(
                    row,
                    first_col,
                    row,
                    first_col + 2,
                    text,
                    &style::kpi_card(*accent),
                )?;
            }
        }

        self.cursor.skip(1);
        Ok(())
    }

    fn write_detail_table(&mut self) -> Result<(), XlsxError> {
        let row = self.cursor.take();
        self.worksheet.merge_range(
            row,
            COL_FIRST,
            row,
            COL_LAST,
            "📋 ANÁLISE DETALHADA",
            &style::section_heading(),
        )?;

        let header = style::table_header();
        let row = self.cursor.take();
        let titles = ["Métrica", "Valor", "Unidade", "Percentual", "Status", "Análise"];
        for (col, title) in titles.iter().enumerate() {
            self.worksheet
                .write_with_format(row, col as u16, *title, &header)?;
        }

        let m = &self.metrics;
        let r = self.record;
        let rows = [
            DetailRow {
                metric: "Valor Unitário",
                value: r.unit_price,
                unit: Unit::Currency,
                pct: "100%".into(),
                status: RowStatus::Base,
                note: "Preço de venda",
            },
            DetailRow {
                metric: "Custo de Produção",
                value: r.unit_cost,
                unit: Unit::Currency,
                pct: format!("{:.1}%", ratio_pct(r.unit_cost, r.unit_price)),
                status: RowStatus::Cost,
                note: "Por unidade",
            },
            DetailRow {
                metric: "Lucro Unitário",
                value: m.unit_profit,
                unit: Unit::Currency,
                pct: format!("{:.1}%", ratio_pct(m.unit_profit, r.unit_price)),
                status: RowStatus::Profit,
                note: "Margem por unidade",
            },
            DetailRow {
                metric: "Quantidade Vendida",
                value: r.units_sold as f64,
                unit: Unit::Count,
                pct: format!("{:.0}%", m.sell_through_pct),
                status: RowStatus::Sales,
                note: "Do estoque total",
            },
            DetailRow {
                metric: "Receita Total",
                value: m.total_revenue,
                unit: Unit::Currency,
                pct: "100%".into(),
                status: RowStatus::Revenue,
                note: "Faturamento bruto",
            },
            DetailRow {
                metric: "Custo Total",
                value: m.total_cost,
                unit: Unit::Currency,
                pct: format!("{:.1}%", ratio_pct(m.total_cost, m.total_revenue)),
                status: RowStatus::Cost,
                note: "Custo de produção total",
            },
            DetailRow {
                metric: "Lucro Total",
                value: m.total_profit,
                unit: Unit::Currency,
                pct: format!("{:.1}%", m.profit_margin_pct),
                status: RowStatus::Profit,
                note: "Resultado final",
            },
            DetailRow {
                metric: "Estoque Restante",
                value: m.remaining_stock as f64,
                unit: Unit::Count,
                pct: format!("{:.0}%", 100.0 - m.sell_through_pct),
                status: RowStatus::Stock,
                note: "Disponível para venda",
            },
        ];

        let left = style::cell_left();
        let center = style::cell_center();
        let currency = style::currency_cell();
        for detail in rows {
            let row = self.cursor.take();
            self.worksheet
                .write_with_format(row, 0, detail.metric, &left)?;
            let value_format = match detail.unit {
                Unit::Currency => &currency,
                Unit::Count => &left,
            };
            self.worksheet
                .write_with_format(row, 1, detail.value, value_format)?;
            self.worksheet
                .write_with_format(row, 2, detail.unit.label(), &center)?;
            self.worksheet
                .write_with_format(row, 3, detail.pct.as_str(), &center)?;
            self.worksheet.write_with_format(
                row,
                4,
                detail.status.label(),
                &style::status_cell(detail.status),
            )?;
            self.worksheet
                .write_with_format(row, 5, detail.note, &center)?;
            self.detail_last_row = row;
        }

        self.cursor.skip(2);
        Ok(())
    }

    fn write_chart_section(&mut self) -> Result<(), XlsxError> {
        let row = self.cursor.take();
        self.worksheet.merge_range(
            row,
            COL_FIRST,
            row,
            COL_LAST,
            "📊 ANÁLISE GRÁFICA",
            &style::section_heading(),
        )?;
        self.cursor.skip(1);

        let m = &self.metrics;
        let header = style::table_header();
        let bordered = style::cell_plain();

        // Pie source block. Charts reference cell ranges, so the data must
        // land on the sheet before the chart objects are attached.
        let pie_header_row = self.cursor.take();
        let titles = ["Categoria", "Valor (R$)", "Percentual"];
        for (col, title) in titles.iter().enumerate() {
            self.worksheet
                .write_with_format(pie_header_row, col as u16, *title, &header)?;
        }
        let slices = [
            (
                "Custo Total",
                m.total_cost,
                format!("{:.1}%", ratio_pct(m.total_cost, m.total_revenue)),
            ),
            (
                "Lucro Total",
                m.total_profit,
                format!("{:.1}%", m.profit_margin_pct),
            ),
        ];
        for (label, value, pct) in slices {
            let row = self.cursor.take();
            self.worksheet.write_with_format(row, 0, label, &bordered)?;
            self.worksheet.write_with_format(row, 1, value, &bordered)?;
            self.worksheet
                .write_with_format(row, 2, pct.as_str(), &bordered)?;
        }
        self.cursor.skip(1);

        // Column-chart source block.
        let indicator_header_row = self.cursor.take();
        self.worksheet.write(indicator_header_row, 0, "Indicador")?;
        self.worksheet.write(indicator_header_row, 1, "Valor")?;
        let indicators = [
            ("Receita", m.total_revenue),
            ("Custo", m.total_cost),
            ("Lucro", m.total_profit),
        ];
        for (label, value) in indicators {
            let row = self.cursor.take();
            self.worksheet.write(row, 0, label)?;
            self.worksheet.write(row, 1, value)?;
        }

        let anchor_row = self.cursor.row();
        self.worksheet
            .insert_chart(anchor_row, 0, &charts::cost_profit_pie(pie_header_row))?;
        self.worksheet
            .insert_chart(anchor_row, 3, &charts::comparison_column(indicator_header_row))?;
        self.cursor.skip(CHART_AREA_ROWS);
        Ok(())
    }

    fn write_trends(&mut self) -> Result<(), XlsxError> {
        let row = self.cursor.take();
        self.worksheet.merge_range(
            row,
            COL_FIRST,
            row,
            COL_LAST,
            "📈 ANÁLISE DE TENDÊNCIAS E RECOMENDAÇÕES",
            &style::section_heading(),
        )?;

        let m = &self.metrics;
        let margin_tier = MarginTier::classify(m.profit_margin_pct);
        let turnover_tier = TurnoverTier::classify(m.sell_through_pct);
        let margin_emphasis = match margin_tier {
            MarginTier::Excellent => Emphasis::Positive,
            MarginTier::NeedsReview => Emphasis::Warning,
            MarginTier::Satisfactory => Emphasis::None,
        };

        let rows: [(&str, String, String, Emphasis); 5] = [
            (
                "Análise de Rentabilidade:",
                format!("Margem Líquida: {:.1}%", m.profit_margin_pct),
                margin_narrative(margin_tier).to_string(),
                margin_emphasis,
            ),
            (
                "Gestão de Estoque:",
                format!("Taxa de Ocupação: {:.0}%", m.sell_through_pct),
                turnover_narrative(turnover_tier).to_string(),
                Emphasis::None,
            ),
            (
                "Recomendação 1:",
                "Manter preço atual".into(),
                "Considerar aumento se mercado permitir".into(),
                Emphasis::None,
            ),
            (
                "Recomendação 2:",
                "Otimizar custos".into(),
                format!(
                    "Reduzir custos em 5% aumentaria lucro em {:.0}%",
                    m.cost_saving_gain_pct()
                ),
                Emphasis::None,
            ),
            (
                "Projeção:",
                "Lucro projetado (próximo mês)".into(),
                format_brl(m.projected_profit()),
                Emphasis::None,
            ),
        ];

        let label_format = style::trend_label();
        let text_format = style::trend_text();
        for (label, value, narrative, emphasis) in rows {
            let row = self.cursor.take();
            self.worksheet
                .merge_range(row, 0, row, 1, label, &label_format)?;
            self.worksheet
                .merge_range(row, 2, row, 3, &value, &text_format)?;
            self.worksheet
                .merge_range(row, 4, row, 5, &narrative, &style::trend_narrative(emphasis))?;
        }

        self.cursor.skip(2);
        Ok(())
    }

    fn write_footer(&mut self) -> Result<(), XlsxError> {
        let row = self.cursor.take();
        self.worksheet
            .merge_range(row, COL_FIRST, row, COL_LAST, FOOTER_TEXT, &style::footer())?;
        Ok(())
    }

    /// Three-point color scale over the value column, spanning the KPI cards
    /// through the detail table. The range follows the rows the cursor
    /// actually assigned, not a fixed span.
    fn apply_value_color_scale(&mut self) -> Result<(), XlsxError> {
        let scale = ConditionalFormat3ColorScale::new()
            .set_minimum_color(style::SCALE_LOW)
            .set_midpoint_color(style::SCALE_MID)
            .set_maximum_color(style::SCALE_HIGH);
        self.worksheet
            .add_conditional_format(self.kpi_first_row, 1, self.detail_last_row, 1, &scale)?;
        Ok(())
    }
}

fn margin_narrative(tier: MarginTier) -> &'static str {
    match tier {
        MarginTier::Excellent => "Excelente margem de lucro! ⭐",
        MarginTier::Satisfactory => "Margem de lucro satisfatória ✓",
        MarginTier::NeedsReview => "Margem de lucro baixa, rever custos ⚠",
    }
}

fn turnover_narrative(tier: TurnoverTier) -> &'static str {
    match tier {
        TurnoverTier::Good => "Boa rotatividade de estoque ✓",
        TurnoverTier::Low => "Estoque com baixa rotatividade, considerar promoções",
    }
}
