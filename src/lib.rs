pub mod agent;
pub mod pylos;
pub mod ptp_server;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, bail, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::collections::HashMap;
    }
}

pub mod prelude {
    pub use super::agent::*;
    pub use super::pylos::prelude::*;
    pub use super::ptp_server::*;
    pub use super::utils::prelude::*;
}
