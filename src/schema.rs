/// Number of fields in every row of a daily stock file.
pub const FIELD_COUNT: usize = 18;

/// Number of numeric fields following `date` and `code`.
pub const NUMERIC_COLUMNS: usize = 16;

/// Offset of the first numeric field within a row.
pub const NUMERIC_START: usize = 2;

/// Separator inside the compound `code` field (`sh.600000`).
pub const CODE_SEPARATOR: char = '.';

/// Pattern of the `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns of a daily stock file, in file order.
///
/// ```text
/// date,code,open,high,low,close,preclose,volume,amount,
/// adjustflag,turn,tradestatus,pctChg,peTTM,pbMRQ,psTTM,pcfNcfTTM,isST
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Code,
    Open,
    High,
    Low,
    Close,
    PreClose,
    Volume,
    Amount,
    AdjustFlag,
    Turn,
    TradeStatus,
    PctChg,
    PeTtm,
    PbMrq,
    PsTtm,
    PcfNcfTtm,
    IsSt,
}

impl Column {
    /// All columns in file order.
    pub const ALL: [Column; FIELD_COUNT] = [
        Column::Date,
        Column::Code,
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::PreClose,
        Column::Volume,
        Column::Amount,
        Column::AdjustFlag,
        Column::Turn,
        Column::TradeStatus,
        Column::PctChg,
        Column::PeTtm,
        Column::PbMrq,
        Column::PsTtm,
        Column::PcfNcfTtm,
        Column::IsSt,
    ];

    /// Position of the column within a CSV row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Offset into the numeric parse buffer, `None` for `date` and `code`.
    pub fn numeric_offset(self) -> Option<usize> {
        self.index().checked_sub(NUMERIC_START)
    }

    /// Column for a numeric buffer offset.
    pub fn from_numeric_offset(offset: usize) -> Option<Column> {
        Column::ALL.get(offset + NUMERIC_START).copied()
    }

    /// Header name as written by the data vendor.
    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Code => "code",
            Column::Open => "open",
            Column::High => "high",
            Column::Low => "low",
            Column::Close => "close",
            Column::PreClose => "preclose",
            Column::Volume => "volume",
            Column::Amount => "amount",
            Column::AdjustFlag => "adjustflag",
            Column::Turn => "turn",
            Column::TradeStatus => "tradestatus",
            Column::PctChg => "pctChg",
            Column::PeTtm => "peTTM",
            Column::PbMrq => "pbMRQ",
            Column::PsTtm => "psTTM",
            Column::PcfNcfTtm => "pcfNcfTTM",
            Column::IsSt => "isST",
        }
    }

    /// Whether a blank or unparseable value is expected and should not be reported.
    ///
    /// Turnover is empty on suspended days.
    pub fn blank_tolerated(self) -> bool {
        self == Column::Turn
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Splits a compound code such as `sh.600000` and returns the part after the
/// first separator.
pub fn split_stock_code(code: &str) -> Option<&str> {
    code.split(CODE_SEPARATOR).nth(1)
}
