use crate::refs::{ObjectReferences, RefType};
use crate::ReportError;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// How the pixel data of an image ends up in the PDF
enum Encoding {
    /// An RGB JPEG that PDF readers can decode as-is
    Jpeg(Vec<u8>),
    /// Anything else, decoded and re-compressed losslessly
    Raster(DynamicImage),
}

/// A raster image (typically an inspection photo), decoded and ready to be embedded.
/// Images are stored "globally" in the document so a photo placed on several pages is
/// only embedded once.
pub struct Image {
    encoding: Encoding,
    /// pixel width
    pub width: u32,
    /// pixel height
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode an image from its encoded bytes (PNG, JPEG, WebP, ...), guessing the format
    pub fn from_bytes(data: &[u8]) -> Result<Image, ReportError> {
        let format = image::guess_format(data)?;
        let decoded = image::load_from_memory_with_format(data, format)?;
        let (width, height) = decoded.dimensions();

        let encoding = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => Encoding::Jpeg(data.to_vec()),
            _ => Encoding::Raster(decoded),
        };

        Ok(Image {
            encoding,
            width,
            height,
        })
    }

    /// Read and decode an image file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Image, ReportError> {
        let data = std::fs::read(path.as_ref())?;
        Image::from_bytes(&data)
    }

    /// Width divided by height; 1.0 for degenerate images
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    fn encode(&self) -> EncodeOutput {
        match &self.encoding {
            Encoding::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            Encoding::Raster(image) => {
                let level = CompressionLevel::DefaultLevel as u8;
                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|(_, _, p)| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();
        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, &encoded.bytes);
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, &encoded.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask);
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}
