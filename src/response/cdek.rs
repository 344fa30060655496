use std::fmt;

schema! {
    /// City identifiers of a delivery service.
    pub struct Cdek {
        /// KLADR code of the city.
        pub kladr_id: Option<String>,
        /// FIAS code of the city.
        pub fias_id: Option<String>,
        /// City id in the CDEK directory.
        pub cdek_id: Option<String>,
    }
}

/// Renders as the CDEK city id, or nothing when it is unknown.
impl fmt::Display for Cdek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cdek_id.as_deref().unwrap_or_default())
    }
}
