//! The ten category functions offered to the model, and where each of their
//! arguments lands in the schema.

use inmodoc_core::{DbTable, FieldCategory};
use serde_json::{json, Map, Value};

use crate::types::FunctionDefinition;

/// Name of the self-reported confidence argument every function carries.
pub const CONFIDENCE_PARAM: &str = "confidence";

/// Where a function argument is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamTarget {
    Field {
        table: DbTable,
        column: &'static str,
    },
    /// A full personal name, split into `firstName` and `lastName`.
    FullName,
}

#[derive(Debug, Clone)]
pub struct FunctionParam {
    pub name: &'static str,
    pub target: ParamTarget,
    pub schema: Value,
}

/// One forced function call per semantic category.
#[derive(Debug, Clone)]
pub struct CategoryFunction {
    pub category: FieldCategory,
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<FunctionParam>,
}

impl CategoryFunction {
    /// JSON-schema definition sent in the `tools` array.
    #[must_use]
    pub fn definition(&self) -> FunctionDefinition {
        let mut properties = Map::new();
        for param in &self.params {
            properties.insert(param.name.to_string(), param.schema.clone());
        }
        properties.insert(
            CONFIDENCE_PARAM.to_string(),
            json!({
                "type": "number",
                "minimum": 0,
                "maximum": 100,
                "description": "How sure you are, 0-100, that the values above are stated in the document"
            }),
        );

        FunctionDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            parameters: json!({
                "type": "object",
                "properties": properties,
                "additionalProperties": false,
            }),
        }
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&FunctionParam> {
        self.params.iter().find(|p| p.name == name)
    }
}

// ---------------------------------------------------------------------------
// Parameter builders
// ---------------------------------------------------------------------------

fn field(table: DbTable, column: &'static str) -> ParamTarget {
    ParamTarget::Field { table, column }
}

fn integer(
    name: &'static str,
    target: ParamTarget,
    min: i64,
    max: i64,
    description: &str,
) -> FunctionParam {
    FunctionParam {
        name,
        target,
        schema: json!({
            "type": ["integer", "null"],
            "minimum": min,
            "maximum": max,
            "description": description,
        }),
    }
}

fn number(
    name: &'static str,
    target: ParamTarget,
    min: f64,
    max: f64,
    description: &str,
) -> FunctionParam {
    FunctionParam {
        name,
        target,
        schema: json!({
            "type": ["number", "null"],
            "minimum": min,
            "maximum": max,
            "description": description,
        }),
    }
}

fn boolean(name: &'static str, column: &'static str, description: &str) -> FunctionParam {
    FunctionParam {
        name,
        target: field(DbTable::Properties, column),
        schema: json!({
            "type": ["boolean", "null"],
            "description": description,
        }),
    }
}

fn text(name: &'static str, target: ParamTarget, description: &str) -> FunctionParam {
    FunctionParam {
        name,
        target,
        schema: json!({
            "type": ["string", "null"],
            "description": description,
        }),
    }
}

fn choice(
    name: &'static str,
    target: ParamTarget,
    values: &[&str],
    description: &str,
) -> FunctionParam {
    let mut allowed: Vec<Value> = values.iter().map(|v| json!(v)).collect();
    allowed.push(Value::Null);
    FunctionParam {
        name,
        target,
        schema: json!({
            "type": ["string", "null"],
            "enum": allowed,
            "description": description,
        }),
    }
}

const ENERGY_SCALE: &[&str] = &["A", "B", "C", "D", "E", "F", "G"];

// ---------------------------------------------------------------------------
// Category functions
// ---------------------------------------------------------------------------

/// All ten category functions, in the order they are called and merged.
#[allow(clippy::too_many_lines)]
#[must_use]
pub fn category_functions() -> Vec<CategoryFunction> {
    let p = DbTable::Properties;
    let l = DbTable::Listings;
    let c = DbTable::Contacts;

    vec![
        CategoryFunction {
            category: FieldCategory::Basic,
            name: "extract_basic_info",
            description: "Extract the basic identification and size of the property",
            params: vec![
                choice(
                    "property_type",
                    field(p, "propertyType"),
                    &["piso", "casa", "local", "solar", "garaje"],
                    "piso for flats, apartments, lofts and studios; casa for houses and chalets",
                ),
                integer("bedrooms", field(p, "bedrooms"), 0, 50, "Number of bedrooms (dormitorios/habitaciones)"),
                integer("bathrooms", field(p, "bathrooms"), 0, 20, "Number of bathrooms (baños/aseos)"),
                number("square_meter", field(p, "squareMeter"), 1.0, 100_000.0, "Useful area in m²"),
                number("built_area", field(p, "builtSurfaceArea"), 1.0, 100_000.0, "Built area in m² (superficie construida)"),
                number("plot_size", field(p, "plotSize"), 1.0, 100_000.0, "Plot area in m² (parcela)"),
                integer("year_built", field(p, "yearBuilt"), 1700, 2100, "Year of construction"),
                text("cadastral_reference", field(p, "cadastralReference"), "20-character referencia catastral"),
                text("street", field(p, "street"), "Street name and number"),
                text("address_details", field(p, "addressDetails"), "Floor, door, staircase or block"),
                text("postal_code", field(p, "postalCode"), "Five-digit Spanish postal code"),
                text("city", field(p, "city"), "City or town"),
                text("province", field(p, "province"), "Province"),
                text("neighborhood", field(p, "neighborhood"), "Neighbourhood or district"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Listing,
            name: "extract_listing_info",
            description: "Extract the commercial terms of the listing",
            params: vec![
                choice(
                    "listing_type",
                    field(l, "listingType"),
                    &["Sale", "Rent", "RentWithOption", "RoomSharing", "Transfer"],
                    "venta → Sale, alquiler → Rent, alquiler con opción a compra → RentWithOption, alquiler de habitación → RoomSharing, traspaso → Transfer",
                ),
                number("price", field(l, "price"), 0.0, 1.0e9, "Asking price or monthly rent in euros, as a plain number"),
                number("price_per_square_meter", field(l, "pricePerSquareMeter"), 0.0, 1.0e6, "Price per square metre in euros, only when stated as such"),
                number("community_fees", field(l, "communityFees"), 0.0, 1.0e6, "Monthly community fees in euros"),
                number("ibi", field(l, "ibi"), 0.0, 1.0e6, "Yearly IBI property tax in euros"),
                number("deposit", field(l, "deposit"), 0.0, 1.0e7, "Deposit (fianza) in euros"),
                text("agency_reference", field(l, "agencyReference"), "Agency reference code of the listing"),
                boolean_listing("is_furnished", "isFurnished", "Sold or let furnished"),
                boolean_listing("pets_allowed", "petsAllowed", "Pets are allowed"),
                text("available_from", field(l, "availableFrom"), "Date from which the property is available"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Amenities,
            name: "extract_amenities",
            description: "Extract building and property amenities",
            params: vec![
                boolean("has_elevator", "hasElevator", "Building has a lift (ascensor)"),
                boolean("has_garage", "hasGarage", "Includes a garage or parking space"),
                integer("garage_spaces", field(p, "garageSpaces"), 0, 30, "Number of parking spaces"),
                boolean("has_storage_room", "hasStorageRoom", "Includes a storage room (trastero)"),
                boolean("terrace", "terrace", "Has a terrace"),
                number("terrace_size", field(p, "terraceSize"), 1.0, 100_000.0, "Terrace area in m²"),
                boolean("pool", "pool", "Has a private or community pool"),
                boolean("garden", "garden", "Has a garden"),
                boolean("air_conditioning", "airConditioning", "Has air conditioning"),
                text("heating_type", field(p, "heatingType"), "Heating system, e.g. gas natural, central, eléctrica"),
                boolean("built_in_wardrobes", "builtInWardrobes", "Has built-in wardrobes"),
                boolean("disabled_accessible", "disabledAccessible", "Adapted for reduced mobility"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Energy,
            name: "extract_energy_info",
            description: "Extract the energy performance certificate",
            params: vec![
                choice("energy_scale", field(p, "energyCertification"), ENERGY_SCALE, "Energy consumption rating letter"),
                number("energy_consumption", field(p, "energyConsumptionValue"), 0.0, 10_000.0, "Consumption in kWh/m² year"),
                choice("emissions_scale", field(p, "emissionsScale"), ENERGY_SCALE, "Emissions rating letter"),
                number("emissions_value", field(p, "emissionsValue"), 0.0, 10_000.0, "Emissions in kg CO2/m² year"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Condition,
            name: "extract_condition_info",
            description: "Extract the condition of the property",
            params: vec![
                choice(
                    "conservation_status",
                    field(p, "conservationStatus"),
                    &["NewBuild", "VeryGood", "Good", "Renovated", "NeedsRenovation"],
                    "a estrenar → NewBuild, reformado → Renovated, a reformar → NeedsRenovation",
                ),
                integer("last_renovation_year", field(p, "lastRenovationYear"), 1700, 2100, "Year of the last renovation"),
                boolean("exterior", "exterior", "The dwelling faces the street (exterior)"),
                boolean("bright", "bright", "Described as bright (luminoso)"),
                boolean("is_bank_owned", "isBankOwned", "Property owned by a bank"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Kitchen,
            name: "extract_kitchen_info",
            description: "Extract kitchen features",
            params: vec![
                text("kitchen_type", field(p, "kitchenType"), "Kitchen type as described"),
                boolean("furnished_kitchen", "furnishedKitchen", "Kitchen is furnished or equipped"),
                boolean("open_kitchen", "openKitchen", "Open or American-style kitchen"),
                boolean("pantry", "pantry", "Has a pantry (despensa)"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Spaces,
            name: "extract_spaces_info",
            description: "Extract layout, floor and orientation",
            params: vec![
                choice(
                    "orientation",
                    field(p, "orientation"),
                    &["norte", "sur", "este", "oeste", "noreste", "noroeste", "sureste", "suroeste"],
                    "Main orientation",
                ),
                text("floor", field(p, "floor"), "Floor of the dwelling, e.g. 3º, bajo, ático"),
                integer("total_floors", field(p, "totalFloors"), 0, 30, "Floors in the building"),
                integer("balcony_count", field(p, "balconyCount"), 0, 30, "Number of balconies"),
                boolean("laundry_room", "laundryRoom", "Has a laundry room (lavadero)"),
                boolean("study", "study", "Has a study or office room"),
                boolean("living_room", "livingRoom", "Has a living room (salón)"),
                boolean("attic", "attic", "Has an attic (buhardilla)"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Luxury,
            name: "extract_luxury_features",
            description: "Extract premium features",
            params: vec![
                boolean("jacuzzi", "jacuzzi", "Has a jacuzzi or hydromassage"),
                boolean("sauna", "sauna", "Has a sauna"),
                boolean("home_automation", "homeAutomation", "Has home automation (domótica)"),
                boolean("security_guard", "securityGuard", "Concierge or security service"),
                boolean("views", "views", "Notable views"),
                boolean("gym", "gym", "Has a gym"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Appliances,
            name: "extract_appliances",
            description: "Extract included appliances",
            params: vec![
                boolean("oven", "oven", "Oven included"),
                boolean("microwave", "microwave", "Microwave included"),
                boolean("washing_machine", "washingMachine", "Washing machine included"),
                boolean("fridge", "fridge", "Fridge included"),
                boolean("dishwasher", "dishwasher", "Dishwasher included"),
                boolean("dryer", "dryer", "Dryer included"),
                boolean("television", "television", "Television included"),
            ],
        },
        CategoryFunction {
            category: FieldCategory::Contact,
            name: "extract_contact_info",
            description: "Extract the owner or contact person",
            params: vec![
                text("owner_name", ParamTarget::FullName, "Full name of the owner or contact"),
                text("email", field(c, "email"), "E-mail address"),
                text("phone", field(c, "phone"), "Phone number"),
                text("nif", field(c, "nif"), "DNI or NIE"),
            ],
        },
    ]
}

fn boolean_listing(name: &'static str, column: &'static str, description: &str) -> FunctionParam {
    FunctionParam {
        target: field(DbTable::Listings, column),
        ..boolean(name, column, description)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use inmodoc_extract::FieldDictionary;

    use super::*;

    #[test]
    fn one_function_per_category() {
        let functions = category_functions();
        assert_eq!(functions.len(), FieldCategory::ALL.len());
        for (function, category) in functions.iter().zip(FieldCategory::ALL) {
            assert_eq!(function.category, category);
        }
        let names: HashSet<_> = functions.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), functions.len());
    }

    #[test]
    fn every_target_exists_in_dictionary() {
        let dict = FieldDictionary::spanish_real_estate();
        for function in category_functions() {
            for param in &function.params {
                if let ParamTarget::Field { table, column } = param.target {
                    assert!(
                        dict.get(table, column).is_some(),
                        "{}.{} ({}) missing from dictionary",
                        table,
                        column,
                        function.name
                    );
                }
            }
        }
    }

    #[test]
    fn definition_is_object_schema_with_confidence() {
        let functions = category_functions();
        let def = functions[0].definition();
        assert_eq!(def.name, "extract_basic_info");
        assert_eq!(def.parameters["type"], "object");
        assert_eq!(def.parameters["properties"]["bedrooms"]["maximum"], 50);
        assert_eq!(def.parameters["properties"][CONFIDENCE_PARAM]["maximum"], 100);
    }

    #[test]
    fn enum_params_accept_null() {
        let functions = category_functions();
        let listing = functions[1].definition();
        let allowed = listing.parameters["properties"]["listing_type"]["enum"]
            .as_array()
            .unwrap()
            .clone();
        assert!(allowed.contains(&json!("Sale")));
        assert!(allowed.contains(&Value::Null));
    }

    #[test]
    fn contact_function_splits_owner_name() {
        let functions = category_functions();
        let contact = functions.last().unwrap();
        assert_eq!(contact.param("owner_name").unwrap().target, ParamTarget::FullName);
    }
}
