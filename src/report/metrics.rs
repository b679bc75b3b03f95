//! Sales Metrics Module
//! Derives every report figure from one monthly sales record.

/// Profit margin above which the profitability narrative is "excellent".
pub const MARGIN_EXCELLENT_PCT: f64 = 30.0;
/// Profit margin above which (short of excellent) it is "satisfactory".
pub const MARGIN_SATISFACTORY_PCT: f64 = 15.0;
/// Sell-through above which stock turnover counts as good.
pub const TURNOVER_GOOD_PCT: f64 = 70.0;

/// One month of sales figures for a single product, as submitted.
#[derive(Debug, Clone)]
pub struct SalesRecord {
    pub item: String,
    pub period: String,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub units_sold: i64,
    /// Stock counted before the sold units are deducted.
    pub stock_on_hand: i64,
}

/// Figures derived once per build and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesMetrics {
    pub unit_profit: f64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    /// May be negative when the record is oversold; rendered as-is.
    pub remaining_stock: i64,
    pub profit_margin_pct: f64,
    pub sell_through_pct: f64,
}

impl SalesMetrics {
    /// Compute all derived figures. Total over any well-typed record:
    /// every division is guarded, so degenerate inputs (zero sales,
    /// oversold stock) still yield values instead of faults.
    pub fn from_record(record: &SalesRecord) -> Self {
        let unit_profit = record.unit_price - record.unit_cost;
        let total_revenue = record.unit_price * record.units_sold as f64;
        let total_cost = record.unit_cost * record.units_sold as f64;
        let total_profit = total_revenue - total_cost;
        let remaining_stock = record.stock_on_hand - record.units_sold;
        let profit_margin_pct = ratio_pct(total_profit, total_revenue);
        let sell_through_pct = ratio_pct(
            record.units_sold as f64,
            (record.units_sold + remaining_stock) as f64,
        );

        Self {
            unit_profit,
            total_revenue,
            total_cost,
            total_profit,
            remaining_stock,
            profit_margin_pct,
            sell_through_pct,
        }
    }

    /// Next-period profit under the fixed 10% optimistic projection.
    pub fn projected_profit(&self) -> f64 {
        self.total_profit * 1.10
    }

    /// Profit gain, in percent, from a hypothetical 5% cost reduction.
    pub fn cost_saving_gain_pct(&self) -> f64 {
        if self.total_profit == 0.0 {
            return 0.0;
        }
        (self.total_profit + self.total_cost * 0.05) / self.total_profit * 100.0 - 100.0
    }
}

/// `part` over `whole` as a percentage, 0 when the denominator is zero.
pub(crate) fn ratio_pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Narrative tier for the profitability recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginTier {
    Excellent,
    Satisfactory,
    NeedsReview,
}

impl MarginTier {
    /// Thresholds are strict: exactly 30% is satisfactory and exactly 15%
    /// needs review.
    pub fn classify(margin_pct: f64) -> Self {
        if margin_pct > MARGIN_EXCELLENT_PCT {
            MarginTier::Excellent
        } else if margin_pct > MARGIN_SATISFACTORY_PCT {
            MarginTier::Satisfactory
        } else {
            MarginTier::NeedsReview
        }
    }
}

/// Narrative tier for the stock turnover recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnoverTier {
    Good,
    Low,
}

impl TurnoverTier {
    /// Strict threshold: exactly 70% still counts as low turnover.
    pub fn classify(sell_through_pct: f64) -> Self {
        if sell_through_pct > TURNOVER_GOOD_PCT {
            TurnoverTier::Good
        } else {
            TurnoverTier::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> SalesRecord {
        SalesRecord {
            item: "Widget".into(),
            period: "Março/2024".into(),
            unit_price: 10.0,
            unit_cost: 6.0,
            units_sold: 100,
            stock_on_hand: 150,
        }
    }

    #[test]
    fn widget_scenario() {
        let m = SalesMetrics::from_record(&widget());
        assert_eq!(m.unit_profit, 4.0);
        assert_eq!(m.total_revenue, 1000.0);
        assert_eq!(m.total_cost, 600.0);
        assert_eq!(m.total_profit, 400.0);
        assert_eq!(m.remaining_stock, 50);
        assert_eq!(m.profit_margin_pct, 40.0);
        assert!((m.sell_through_pct - 66.666_666_666_666_67).abs() < 1e-9);
        assert_eq!(MarginTier::classify(m.profit_margin_pct), MarginTier::Excellent);
        assert_eq!(TurnoverTier::classify(m.sell_through_pct), TurnoverTier::Low);
    }

    #[test]
    fn unit_breakdown_round_trips() {
        let record = widget();
        let m = SalesMetrics::from_record(&record);
        assert_eq!(m.unit_profit + record.unit_cost, record.unit_price);
        assert_eq!(m.total_profit, m.total_revenue - m.total_cost);
    }

    #[test]
    fn zero_sales_has_no_division_faults() {
        let mut record = widget();
        record.units_sold = 0;
        let m = SalesMetrics::from_record(&record);
        assert_eq!(m.total_revenue, 0.0);
        assert_eq!(m.total_cost, 0.0);
        assert_eq!(m.profit_margin_pct, 0.0);
        assert_eq!(m.sell_through_pct, 0.0);
        assert_eq!(m.remaining_stock, 150);
    }

    #[test]
    fn empty_stock_and_sales_sell_through_is_zero() {
        let mut record = widget();
        record.units_sold = 0;
        record.stock_on_hand = 0;
        let m = SalesMetrics::from_record(&record);
        assert_eq!(m.sell_through_pct, 0.0);
    }

    #[test]
    fn oversold_stock_goes_negative() {
        let mut record = widget();
        record.units_sold = 200;
        let m = SalesMetrics::from_record(&record);
        assert_eq!(m.remaining_stock, -50);
        // Denominator falls back to the stock counted before the sale.
        assert!((m.sell_through_pct - 133.333_333_333_333_33).abs() < 1e-9);
    }

    #[test]
    fn margin_thresholds_are_strict() {
        assert_eq!(MarginTier::classify(30.0), MarginTier::Satisfactory);
        assert_eq!(MarginTier::classify(30.001), MarginTier::Excellent);
        assert_eq!(MarginTier::classify(15.0), MarginTier::NeedsReview);
        assert_eq!(MarginTier::classify(15.001), MarginTier::Satisfactory);
        assert_eq!(MarginTier::classify(0.0), MarginTier::NeedsReview);
    }

    #[test]
    fn turnover_threshold_is_strict() {
        assert_eq!(TurnoverTier::classify(70.0), TurnoverTier::Low);
        assert_eq!(TurnoverTier::classify(70.001), TurnoverTier::Good);
    }

    #[test]
    fn projection_and_cost_saving() {
        let m = SalesMetrics::from_record(&widget());
        assert!((m.projected_profit() - 440.0).abs() < 1e-9);
        assert!((m.cost_saving_gain_pct() - 7.5).abs() < 1e-9);
    }

    #[test]
    fn cost_saving_guards_zero_profit() {
        let mut record = widget();
        record.unit_cost = record.unit_price;
        let m = SalesMetrics::from_record(&record);
        assert_eq!(m.total_profit, 0.0);
        assert_eq!(m.cost_saving_gain_pct(), 0.0);
    }
}
