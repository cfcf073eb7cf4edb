mod centering;
mod classification;
mod fill_cell;
mod radii;
mod template;
mod wyckoff;

pub use centering::Centering;
pub use classification::CrystalFamily;
pub use fill_cell::{fill_cell_info, FillCellInfo};
pub use radii::RadiiOracle;
pub use template::{Term, TemplateTriple};
pub use wyckoff::{wyckoff_positions, WyckoffOrbit};
