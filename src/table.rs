use crate::schema;

/// Tolerance used when comparing a pre-close with the previous close.
const PRICE_EPSILON: f64 = 1e-6;

/// Date stored for rows whose `date` field cannot be parsed (0001-01-01).
pub fn zero_date() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(chrono::NaiveDate::MIN)
}

/// Price adjustment applied by the vendor for corporate actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustFlag {
    BackAdjusted,
    ForwardAdjusted,
    Unadjusted,
}

impl AdjustFlag {
    /// Flag for a stored column value; only exactly 1, 2 or 3 map.
    pub fn from_value(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(AdjustFlag::BackAdjusted)
        } else if value == 2.0 {
            Some(AdjustFlag::ForwardAdjusted)
        } else if value == 3.0 {
            Some(AdjustFlag::Unadjusted)
        } else {
            None
        }
    }
}

/// Full daily history of one stock, stored column by column.
///
/// Every column has one entry per data row of the source file, in file order,
/// so index `i` refers to the same trading day in all of them. The table is
/// built once by the loader and is read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DayTable {
    stock_code: String,
    dates: Vec<chrono::NaiveDate>,
    opens: Vec<f64>,
    highs: Vec<f64>,
    lows: Vec<f64>,
    closes: Vec<f64>,
    pre_closes: Vec<f64>,
    volumes: Vec<f64>,
    amounts: Vec<f64>,
    adjust_flags: Vec<f64>,
    turns: Vec<f64>,
    trade_status: Vec<f64>,
    pct_chgs: Vec<f64>,
    pe_ttms: Vec<f64>,
    pb_mrqs: Vec<f64>,
    ps_ttms: Vec<f64>,
    pcf_ncf_ttms: Vec<f64>,
    is_sts: Vec<f64>,
}

impl DayTable {
    /// Appends one trading day. `values` is indexed by numeric column offset.
    pub(crate) fn push_row(
        &mut self,
        date: chrono::NaiveDate,
        values: &[f64; schema::NUMERIC_COLUMNS],
    ) {
        self.dates.push(date);
        self.opens.push(values[0]);
        self.highs.push(values[1]);
        self.lows.push(values[2]);
        self.closes.push(values[3]);
        self.pre_closes.push(values[4]);
        self.volumes.push(values[5]);
        self.amounts.push(values[6]);
        self.adjust_flags.push(values[7]);
        self.turns.push(values[8]);
        self.trade_status.push(values[9]);
        self.pct_chgs.push(values[10]);
        self.pe_ttms.push(values[11]);
        self.pb_mrqs.push(values[12]);
        self.ps_ttms.push(values[13]);
        self.pcf_ncf_ttms.push(values[14]);
        self.is_sts.push(values[15]);
    }

    pub(crate) fn set_stock_code(&mut self, code: impl Into<String>) {
        self.stock_code = code.into();
    }

    pub fn stock_code(&self) -> &str {
        &self.stock_code
    }

    /// Number of trading days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Whether every column has the same length.
    pub fn is_aligned(&self) -> bool {
        let len = self.dates.len();
        self.numeric_columns().iter().all(|column| column.len() == len)
    }

    /// Numeric column by schema column, `None` for `date` and `code`.
    pub fn column(&self, column: schema::Column) -> Option<&[f64]> {
        let offset = column.numeric_offset()?;
        self.numeric_columns().get(offset).copied()
    }

    fn numeric_columns(&self) -> [&[f64]; schema::NUMERIC_COLUMNS] {
        [
            &self.opens,
            &self.highs,
            &self.lows,
            &self.closes,
            &self.pre_closes,
            &self.volumes,
            &self.amounts,
            &self.adjust_flags,
            &self.turns,
            &self.trade_status,
            &self.pct_chgs,
            &self.pe_ttms,
            &self.pb_mrqs,
            &self.ps_ttms,
            &self.pcf_ncf_ttms,
            &self.is_sts,
        ]
    }

    pub fn dates(&self) -> &[chrono::NaiveDate] {
        &self.dates
    }

    pub fn opens(&self) -> &[f64] {
        &self.opens
    }

    pub fn highs(&self) -> &[f64] {
        &self.highs
    }

    pub fn lows(&self) -> &[f64] {
        &self.lows
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn pre_closes(&self) -> &[f64] {
        &self.pre_closes
    }

    /// Traded shares.
    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    /// Traded value in yuan.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    pub fn adjust_flags(&self) -> &[f64] {
        &self.adjust_flags
    }

    /// Turnover rate; 0.0 on suspended days.
    pub fn turns(&self) -> &[f64] {
        &self.turns
    }

    /// 1 for normal trading, 0 for suspended.
    pub fn trade_status(&self) -> &[f64] {
        &self.trade_status
    }

    /// Percentage change against the pre-close.
    pub fn pct_chgs(&self) -> &[f64] {
        &self.pct_chgs
    }

    pub fn pe_ttms(&self) -> &[f64] {
        &self.pe_ttms
    }

    pub fn pb_mrqs(&self) -> &[f64] {
        &self.pb_mrqs
    }

    pub fn ps_ttms(&self) -> &[f64] {
        &self.ps_ttms
    }

    pub fn pcf_ncf_ttms(&self) -> &[f64] {
        &self.pcf_ncf_ttms
    }

    /// 1 for special-treatment stocks, 0 otherwise.
    pub fn is_sts(&self) -> &[f64] {
        &self.is_sts
    }

    /// All fields of trading day `index`.
    pub fn row(&self, index: usize) -> Option<DayRecord> {
        if index >= self.len() {
            return None;
        }
        Some(DayRecord {
            date: self.dates[index],
            open: self.opens[index],
            high: self.highs[index],
            low: self.lows[index],
            close: self.closes[index],
            pre_close: self.pre_closes[index],
            volume: self.volumes[index],
            amount: self.amounts[index],
            adjust_flag: self.adjust_flags[index],
            turn: self.turns[index],
            trade_status: self.trade_status[index],
            pct_chg: self.pct_chgs[index],
            pe_ttm: self.pe_ttms[index],
            pb_mrq: self.pb_mrqs[index],
            ps_ttm: self.ps_ttms[index],
            pcf_ncf_ttm: self.pcf_ncf_ttms[index],
            is_st: self.is_sts[index],
        })
    }

    /// Rows in file order.
    pub fn iter(&self) -> impl Iterator<Item = DayRecord> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Indices of days with trading suspended.
    pub fn suspended_days(&self) -> Vec<usize> {
        self.trade_status
            .iter()
            .enumerate()
            .filter(|(_, status)| **status == 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of days whose pre-close was re-based by the exchange
    /// (ex-rights or ex-dividend), i.e. it differs from the previous close.
    pub fn ex_rights_days(&self) -> Vec<usize> {
        (1..self.len())
            .filter(|&i| (self.pre_closes[i] - self.closes[i - 1]).abs() > PRICE_EPSILON)
            .collect()
    }
}

/// One trading day read out of a [`DayTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayRecord {
    pub date: chrono::NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub pre_close: f64,
    pub volume: f64,
    pub amount: f64,
    pub adjust_flag: f64,
    pub turn: f64,
    pub trade_status: f64,
    pub pct_chg: f64,
    pub pe_ttm: f64,
    pub pb_mrq: f64,
    pub ps_ttm: f64,
    pub pcf_ncf_ttm: f64,
    pub is_st: f64,
}

impl DayRecord {
    pub fn adjust_flag(&self) -> Option<AdjustFlag> {
        AdjustFlag::from_value(self.adjust_flag)
    }

    pub fn is_suspended(&self) -> bool {
        self.trade_status == 0.0
    }

    pub fn is_st(&self) -> bool {
        self.is_st == 1.0
    }
}
