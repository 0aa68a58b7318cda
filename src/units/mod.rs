//! 단위 정의 및 변환 모듈 모음.

pub mod energy_volume;
pub mod fraction;
pub mod money;

pub use energy_volume::{convert_energy_volume, EnergyVolumeUnit};
pub use fraction::{convert_fraction, FractionUnit};
pub use money::{convert_money, MoneyUnit};
