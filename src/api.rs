use log::{debug, info};

use crate::config::GeotagOptions;
use crate::exif::{ExifData, ExifError, ExifResult};
use crate::geotag::{self, DatumConverter, ReferencePoint, Wgs84Only};
use crate::jpeg::JpegFile;
use crate::utils::file_utils;

/// Main interface to the exifgeo library
pub struct ExifGeo {
    options: GeotagOptions,
    converter: Box<dyn DatumConverter>,
}

impl ExifGeo {
    /// Create an instance that only understands WGS 84 coordinates
    pub fn new(options: GeotagOptions) -> Self {
        ExifGeo {
            options,
            converter: Box::new(Wgs84Only),
        }
    }

    /// Replace the converter used for GPS directories in other datums
    pub fn with_converter(mut self, converter: Box<dyn DatumConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Options in effect
    pub fn options(&self) -> &GeotagOptions {
        &self.options
    }

    /// Parse the EXIF segment of a JPEG image
    ///
    /// # Returns
    /// The directory graph, or an error if the image has no EXIF segment
    pub fn read_exif(&self, jpeg: &[u8]) -> ExifResult<ExifData> {
        let file = JpegFile::parse(jpeg)?;
        let body = file.exif_body()
            .ok_or_else(|| ExifError::InvalidJpeg("No EXIF header found".to_string()))?;
        ExifData::from_app1(body)
    }

    /// Read the reference point stored in a JPEG image
    ///
    /// # Arguments
    /// * `jpeg` - The image bytes
    /// * `file_name` - Path of the image, used for the point name when enabled
    ///
    /// # Returns
    /// The point, or `None` if the image has no GPS directory
    pub fn read_reference_point(&self, jpeg: &[u8], file_name: Option<&str>) -> ExifResult<Option<ReferencePoint>> {
        let data = self.read_exif(jpeg)?;
        let mut point = geotag::reference_point_from_exif(&data, self.converter.as_ref())?;

        if let (Some(point), Some(file_name), true) = (point.as_mut(), file_name, self.options.filename_as_name) {
            point.name = Some(geotag::name_from_path(file_name));
        }

        Ok(point)
    }

    /// List every directory and tag of a JPEG image's EXIF segment
    pub fn dump(&self, jpeg: &[u8]) -> ExifResult<String> {
        let data = self.read_exif(jpeg)?;
        Ok(data.to_string())
    }

    /// Geotag a JPEG image with a reference point
    ///
    /// The point must pass the options' name or time-window check against
    /// the image's capture time.
    ///
    /// # Returns
    /// The rewritten image, or `None` if the point was rejected
    pub fn geotag(&self, jpeg: &[u8], point: &ReferencePoint) -> ExifResult<Option<Vec<u8>>> {
        let mut file = JpegFile::parse(jpeg)?;
        let body = file.exif_body()
            .ok_or_else(|| ExifError::InvalidJpeg("No EXIF header found".to_string()))?;
        let mut data = ExifData::from_app1(body)?;

        let image_time = geotag::image_time(&data);
        if self.options.name.is_none() && image_time.is_none() {
            return Err(ExifError::GenericError("No valid timestamp found in picture".to_string()));
        }
        if !self.options.accepts(point, image_time) {
            return Ok(None);
        }

        geotag::apply_reference_point(&mut data, point)?;
        file.set_exif_body(data.into_app1()?)?;

        let bytes = file.to_bytes()?;
        debug!("Geotagged image is {} bytes", bytes.len());
        Ok(Some(bytes))
    }

    /// Geotag a JPEG file, writing `<input>.jpg` or replacing the input
    ///
    /// # Returns
    /// The path written, or `None` if the point was rejected and nothing was written
    pub fn geotag_file(&self, input_path: &str, point: &ReferencePoint) -> ExifResult<Option<String>> {
        let jpeg = file_utils::read_file(input_path)?;
        let Some(bytes) = self.geotag(&jpeg, point)? else {
            info!("{} left untouched", input_path);
            return Ok(None);
        };

        let written = file_utils::write_output(input_path, &bytes, self.options.overwrite)?;
        info!("Geotagged {} -> {}", input_path, written);
        Ok(Some(written))
    }
}
