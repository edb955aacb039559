use image::codecs::png::PngEncoder;
use image::{ColorType, GrayImage, ImageEncoder};

/// Encodes a grayscale bitmap as PNG.
pub fn encode_gray_png(img: &GrayImage) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(img.as_raw(), img.width(), img.height(), ColorType::L8)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_a_valid_png() {
        let png = encode_gray_png(&GrayImage::new(28, 28)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let back = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(back.dimensions(), (28, 28));
    }
}
