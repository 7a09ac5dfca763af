mod errors;
mod traits;
mod types;
mod vec_env;

pub use errors::{EnvError, ErrorKind};
pub use traits::Env;
pub use types::{Step, StepInfo, TrajectoryShard};
pub use vec_env::VecEnv;
