use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Filenames recognized as CSV regardless of the declared MIME type
    /// - Valid: "plots.csv", "PLOTS.CSV"
    /// - Invalid: "plots.csv.bak", "csv"
    pub static ref CSV_FILENAME_REGEX: Regex = Regex::new(r"(?i)\.csv$").unwrap();

    /// Filenames recognized as GeoTIFF
    /// - Valid: "dem.tif", "dem.tiff", "DEM.TIF"
    /// - Invalid: "dem.tif.aux.xml", "dem.tiffany"
    pub static ref GEOTIFF_FILENAME_REGEX: Regex = Regex::new(r"(?i)\.tiff?$").unwrap();
}
