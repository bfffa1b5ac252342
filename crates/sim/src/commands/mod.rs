mod run;
mod verify;

pub use run::Run;
pub use verify::Verify;
