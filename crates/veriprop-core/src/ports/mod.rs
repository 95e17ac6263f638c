//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! QueryPage エンジンと Classifier は純粋関数なので、
//! 外部との境界（ストア・時刻・ID 生成）だけがここに現れます。

pub mod clock;
pub mod id_generator;
pub mod store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::store::{Record, Store};
