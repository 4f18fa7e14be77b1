use redom::prelude::*;

#[derive(Model)]
pub struct Location {
    #[prop(type = "point")]
    pub coordinates: (f64, f64),
}

#[derive(Model)]
#[schema(data_structure = "HASH", index_name = "venues", name = "Venue")]
pub struct VenueEntity {
    #[prop(indexed, sortable, case_sensitive)]
    pub r#type: String,

    #[prop(type = "text", weight = 1.5, matcher = "dm:fr", stemming = false)]
    pub description: String,

    #[prop(nested)]
    pub location: Option<Location>,

    pub internal_notes: String,
}

#[derive(Model)]
#[model(crate = "::redom")]
#[schema]
pub struct Empty {}

fn main() {
    let _ = SchemaFactory::create_for_class::<Empty>();
    assert_eq!(<VenueEntity as Model>::CLASS_NAME, "VenueEntity");
}
