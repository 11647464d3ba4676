// cli.rs - Command-line interface configuration
use clap::Parser;
use glam::UVec2;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "slicer")]
#[command(about = "Layered image flipbook viewer", long_about = None)]
pub struct Cli {
    /// Image file to slice
    #[arg(short, long, default_value = "slice.png")]
    pub file: PathBuf,

    /// Slice width in pixels; defaults to the full image width
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub slice_width: Option<u32>,

    /// Slice height in pixels; defaults to the slice width
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub slice_height: Option<u32>,

    /// Identical copies stamped per grid cell
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub copies: u64,
}

impl Cli {
    /// Resolve unset slice dimensions against the loaded image: width
    /// falls back to the full image width, height to the width.
    pub fn slice_size(&self, image_width: u32) -> UVec2 {
        let width = self.slice_width.unwrap_or(image_width);
        let height = self.slice_height.unwrap_or(width);
        UVec2::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_dimensions_follow_the_image() {
        let cli = Cli::parse_from(["slicer"]);
        assert_eq!(cli.slice_size(640), UVec2::new(640, 640));
    }

    #[test]
    fn height_defaults_to_width() {
        let cli = Cli::parse_from(["slicer", "-w", "32"]);
        assert_eq!(cli.slice_size(640), UVec2::new(32, 32));
    }

    #[test]
    fn explicit_dimensions_win() {
        let cli = Cli::parse_from(["slicer", "-w", "32", "--slice-height", "48"]);
        assert_eq!(cli.slice_size(640), UVec2::new(32, 48));
    }

    #[test]
    fn copies_parse_as_a_positive_count() {
        let cli = Cli::parse_from(["slicer", "--copies", "4"]);
        assert_eq!(cli.copies, 4);
        let cli = Cli::parse_from(["slicer"]);
        assert_eq!(cli.copies, 1);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(Cli::try_parse_from(["slicer", "-w", "0"]).is_err());
        assert!(Cli::try_parse_from(["slicer", "--copies", "0"]).is_err());
    }
}
