pub mod image_helper {
    use crate::error::Result;
    use image::{ImageFormat, RgbaImage};
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const OUTPUT_SUFFIX: &str = "_unshredded";

    /// Decodes any format the `image` crate knows into 8-bit RGBA.
    pub fn load(path: &Path) -> Result<RgbaImage> {
        Ok(image::open(path)?.to_rgba8())
    }

    /// Encodes `image` in the format implied by the extension of `path`.
    pub fn save(path: &Path, image: &RgbaImage) -> Result<()> {
        let format = ImageFormat::from_path(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        image.write_to(&mut writer, format)?;
        writer.flush()?;
        Ok(())
    }

    /// `photo.png` becomes `photo_unshredded.png`, placed in the working directory.
    pub fn unshredded_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut name = format!("{stem}{OUTPUT_SUFFIX}");
        if let Some(extension) = input.extension() {
            name.push('.');
            name.push_str(&extension.to_string_lossy());
        }
        PathBuf::from(name)
    }
}
