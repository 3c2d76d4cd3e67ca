/// Where a request was made: at a hall call panel on some floor, or from
/// the panel inside the car.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    External,
    Internal,
}

impl Origin {
    pub fn as_string(self) -> String {
        match self {
            Origin::External => String::from("external"),
            Origin::Internal => String::from("internal"),
        }
    }
}
