mod class;
mod field;
mod prop;
mod schema_options;

pub use self::class::*;
pub use self::field::*;
pub use self::prop::*;
pub use self::schema_options::*;
