schema! {
    /// A vehicle make and model.
    pub struct Vehicle {
        pub source: Option<String>,
        pub result: Option<String>,
        pub brand: Option<String>,
        pub model: Option<String>,
        pub qc: i64,
    }
}
