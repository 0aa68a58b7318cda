/// 다루는 물리량/경제량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Money,
    EnergyVolume,
    Fraction,
}

/// 내부 기준 단위로 환산된 값을 담는 컨테이너.
///
/// 각 kind에 따라 `value_base`는 기준 단위(금액=€, 전력량=MWh, 비율=0~1 소수)로 저장한다.
#[derive(Debug, Clone, Copy)]
pub struct QuantityValue {
    pub kind: QuantityKind,
    pub value_base: f64,
}
