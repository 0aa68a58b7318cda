use serde::{Deserialize, Serialize};

/// 금액 표시 단위. 내부 기준은 유로(€)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoneyUnit {
    Euro,
    ThousandEuro,
    MillionEuro,
    /// 십억 유로("mld €")
    BillionEuro,
}

impl MoneyUnit {
    pub const ALL: [MoneyUnit; 4] = [
        MoneyUnit::Euro,
        MoneyUnit::ThousandEuro,
        MoneyUnit::MillionEuro,
        MoneyUnit::BillionEuro,
    ];

    fn factor(self) -> f64 {
        match self {
            MoneyUnit::Euro => 1.0,
            MoneyUnit::ThousandEuro => 1e3,
            MoneyUnit::MillionEuro => 1e6,
            MoneyUnit::BillionEuro => 1e9,
        }
    }

    /// 화면 표시용 기호.
    pub fn symbol(self) -> &'static str {
        match self {
            MoneyUnit::Euro => "€",
            MoneyUnit::ThousandEuro => "k€",
            MoneyUnit::MillionEuro => "M€",
            MoneyUnit::BillionEuro => "bn €",
        }
    }
}

fn to_euro(value: f64, unit: MoneyUnit) -> f64 {
    value * unit.factor()
}

fn from_euro(value: f64, unit: MoneyUnit) -> f64 {
    value / unit.factor()
}

/// 금액을 변환한다.
pub fn convert_money(value: f64, from: MoneyUnit, to: MoneyUnit) -> f64 {
    from_euro(to_euro(value, from), to)
}
