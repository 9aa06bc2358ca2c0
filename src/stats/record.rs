//! Fixed-schema feature record
//!
//! One record per successfully processed region. The field set is fixed
//! at compile time so every row carries the full schema; undefined
//! numeric values print as NaN rather than disappearing into blanks.

/// Output schema, in column order
///
/// The geometry block (area through circularity) is reserved for the
/// shape-analysis stage of the pipeline and stays empty here.
pub const HEADER: [&str; 32] = [
    "img_name",
    "IMG_NUMBER",
    "ID_POLY",
    "CLASSE",
    "SUBCLASSE",
    "area",
    "perim",
    "complexity_measure",
    "spreading",
    "shape_factor",
    "hu_moment",
    "circularity",
    "FG_MEAN",
    "FG_STD",
    "FG_MIN",
    "FG_MAX",
    "FG_MEDIAN",
    "FG_VAR_COEF",
    "FG_THRES",
    "BG_MEAN",
    "BG_STD",
    "BG_MIN",
    "BG_MAX",
    "BG_MEDIAN",
    "BG_VAR_COEF",
    "BG_THRES",
    "FG_BG_MAX_CONTRAST",
    "FG_BG_MEAN_CONTRAST_RATIO",
    "POWER_MEAN_RATIO",
    "BORDER_GRAD_MEAN",
    "BORDER_GRAD_STD",
    "BORDER_GRAD_MAX",
];

/// One feature record for a candidate region
#[derive(Debug, Clone)]
pub struct FeatureRecord {
    /// Scene identifier the region was clipped from
    pub img_name: String,
    /// Leading decimal prefix of the scene identifier, empty when absent
    pub img_number: String,
    /// Composite polygon identifier (may carry a sub-part index)
    pub id_poly: String,
    /// Classification label
    pub classe: String,
    /// Classification sub-label
    pub subclasse: String,

    // Reserved geometry placeholders, computed by the shape-analysis
    // stage, always present and empty here
    pub area: String,
    pub perim: String,
    pub complexity_measure: String,
    pub spreading: String,
    pub shape_factor: String,
    pub hu_moment: String,
    pub circularity: String,

    pub fg_mean: f64,
    pub fg_std: f64,
    pub fg_min: f64,
    pub fg_max: f64,
    pub fg_median: f64,
    pub fg_var_coef: f64,
    pub fg_thres: f64,
    pub bg_mean: f64,
    pub bg_std: f64,
    pub bg_min: f64,
    pub bg_max: f64,
    pub bg_median: f64,
    pub bg_var_coef: f64,
    pub bg_thres: f64,
    pub fg_bg_max_contrast: f64,
    pub fg_bg_mean_contrast_ratio: f64,
    pub power_mean_ratio: f64,
    pub border_grad_mean: f64,
    pub border_grad_std: f64,
    pub border_grad_max: f64,
}

impl FeatureRecord {
    /// The header line of the output table
    pub fn header_row() -> String {
        HEADER.join(",")
    }

    /// Serialize the record as one CSV row in schema order
    pub fn to_csv_row(&self) -> String {
        self.fields().join(",")
    }

    /// All field values in schema order, CSV-escaped
    pub fn fields(&self) -> [String; 32] {
        [
            csv_field(&self.img_name),
            csv_field(&self.img_number),
            csv_field(&self.id_poly),
            csv_field(&self.classe),
            csv_field(&self.subclasse),
            csv_field(&self.area),
            csv_field(&self.perim),
            csv_field(&self.complexity_measure),
            csv_field(&self.spreading),
            csv_field(&self.shape_factor),
            csv_field(&self.hu_moment),
            csv_field(&self.circularity),
            numeric_field(self.fg_mean),
            numeric_field(self.fg_std),
            numeric_field(self.fg_min),
            numeric_field(self.fg_max),
            numeric_field(self.fg_median),
            numeric_field(self.fg_var_coef),
            numeric_field(self.fg_thres),
            numeric_field(self.bg_mean),
            numeric_field(self.bg_std),
            numeric_field(self.bg_min),
            numeric_field(self.bg_max),
            numeric_field(self.bg_median),
            numeric_field(self.bg_var_coef),
            numeric_field(self.bg_thres),
            numeric_field(self.fg_bg_max_contrast),
            numeric_field(self.fg_bg_mean_contrast_ratio),
            numeric_field(self.power_mean_ratio),
            numeric_field(self.border_grad_mean),
            numeric_field(self.border_grad_std),
            numeric_field(self.border_grad_max),
        ]
    }
}

/// Format a numeric field, keeping NaN as an explicit marker
fn numeric_field(value: f64) -> String {
    format!("{}", value)
}

/// Quote a text field when it would break the row
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
