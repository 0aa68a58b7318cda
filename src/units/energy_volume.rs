use serde::{Deserialize, Serialize};

/// 전력량 단위. 내부 기준은 MWh이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyVolumeUnit {
    MegawattHour,
    GigawattHour,
    TerawattHour,
}

impl EnergyVolumeUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            EnergyVolumeUnit::MegawattHour => "MWh",
            EnergyVolumeUnit::GigawattHour => "GWh",
            EnergyVolumeUnit::TerawattHour => "TWh",
        }
    }
}

fn to_mwh(value: f64, unit: EnergyVolumeUnit) -> f64 {
    match unit {
        EnergyVolumeUnit::MegawattHour => value,
        EnergyVolumeUnit::GigawattHour => value * 1e3,
        EnergyVolumeUnit::TerawattHour => value * 1e6,
    }
}

fn from_mwh(value: f64, unit: EnergyVolumeUnit) -> f64 {
    match unit {
        EnergyVolumeUnit::MegawattHour => value,
        EnergyVolumeUnit::GigawattHour => value / 1e3,
        EnergyVolumeUnit::TerawattHour => value / 1e6,
    }
}

/// 전력량을 변환한다.
pub fn convert_energy_volume(value: f64, from: EnergyVolumeUnit, to: EnergyVolumeUnit) -> f64 {
    from_mwh(to_mwh(value, from), to)
}
