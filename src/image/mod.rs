pub mod direction;
pub mod f32;
pub mod io;
pub mod rgb;
pub mod traits;
pub mod u8;

pub use self::direction::{DirectionMap, EdgeDirection};
pub use self::f32::ImageF32;
pub use self::rgb::ImageRgb8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
