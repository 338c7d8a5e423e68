pub const META_FILE: &str = "meta.json";
pub const WIGGLES_FILE: &str = "wigs.npy";
pub const LOCAL_QC_INTENSITY_FILE: &str = "localqcs_intensity.npy";
pub const LOCAL_QC_DISPERSION_FILE: &str = "localqcs_dispersion.npy";
pub const LOCAL_QC_FLAG_FILE: &str = "localqcs_flag.npy";
