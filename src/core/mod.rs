// Domain-layer modules and shared errors/models
pub mod capture {
    pub use crate::capture::*;
}

pub mod qualification {
    pub use crate::qualification::*;
}

pub mod scoring {
    pub use crate::scoring::*;
}

pub mod decision {
    pub use crate::decision::*;
}

pub mod enrichment {
    pub use crate::enrichment::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
