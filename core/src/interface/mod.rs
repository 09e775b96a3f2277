pub mod frame;

pub use frame::SpectrumFrame;
