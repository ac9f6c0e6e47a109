//! Built-in Spanish real-estate field table.
//!
//! Aliases are listed most specific first. Normalized aliases must be unique
//! across the whole table (see the dictionary tests); a label that would fit
//! two fields belongs to exactly one of them.

use inmodoc_core::{DataType, DbTable, FieldCategory};

use super::FieldMapping;
use crate::rules::{
    non_empty, to_cadastral_reference, to_conservation_status, to_email, to_energy_scale,
    to_integer, to_listing_type, to_nif, to_orientation, to_phone, to_property_type,
    valid_area, valid_bathroom_count, valid_cadastral_reference, valid_email,
    valid_energy_scale, valid_energy_value, valid_nif, valid_phone, valid_postal_code,
    valid_price, valid_room_count, valid_small_count, valid_year,
};

fn property(
    column: &'static str,
    data_type: DataType,
    category: FieldCategory,
    aliases: &[&str],
) -> FieldMapping {
    FieldMapping::new(DbTable::Properties, column, data_type, category, aliases)
}

fn listing(
    column: &'static str,
    data_type: DataType,
    category: FieldCategory,
    aliases: &[&str],
) -> FieldMapping {
    FieldMapping::new(DbTable::Listings, column, data_type, category, aliases)
}

fn contact(column: &'static str, data_type: DataType, aliases: &[&str]) -> FieldMapping {
    FieldMapping::new(
        DbTable::Contacts,
        column,
        data_type,
        FieldCategory::Contact,
        aliases,
    )
}

/// Yes/no amenity on the property.
fn feature(column: &'static str, category: FieldCategory, aliases: &[&str]) -> FieldMapping {
    property(column, DataType::Boolean, category, aliases)
}

#[allow(clippy::too_many_lines)]
pub(super) fn builtin_mappings() -> Vec<FieldMapping> {
    use DataType::{Boolean, Decimal, Number, String};
    use FieldCategory::{
        Amenities, Appliances, Basic, Condition, Energy, Kitchen, Listing, Luxury, Spaces,
    };

    vec![
        // -- basic -----------------------------------------------------------
        property(
            "propertyType",
            String,
            Basic,
            &["tipo de inmueble", "tipo de propiedad", "tipo de vivienda", "tipologia"],
        )
        .converted(to_property_type),
        property(
            "bedrooms",
            Number,
            Basic,
            &[
                "dormitorios",
                "habitaciones",
                "numero de habitaciones",
                "numero de dormitorios",
                "num dormitorios",
                "num habitaciones",
                "alcobas",
            ],
        )
        .validated(valid_room_count)
        .converted(to_integer),
        property(
            "bathrooms",
            Number,
            Basic,
            &[
                "banos",
                "numero de banos",
                "cuartos de bano",
                "num banos",
                "aseos",
            ],
        )
        .validated(valid_bathroom_count)
        .converted(to_integer),
        property(
            "squareMeter",
            Number,
            Basic,
            &[
                "superficie",
                "superficie util",
                "metros utiles",
                "m2 utiles",
                "metros cuadrados",
            ],
        )
        .validated(valid_area),
        property(
            "builtSurfaceArea",
            Number,
            Basic,
            &[
                "superficie construida",
                "metros construidos",
                "m2 construidos",
                "sup construida",
            ],
        )
        .validated(valid_area),
        property(
            "plotSize",
            Number,
            Basic,
            &["superficie de parcela", "parcela", "superficie del solar", "solar"],
        )
        .validated(valid_area),
        property(
            "yearBuilt",
            Number,
            Basic,
            &[
                "ano de construccion",
                "ano construccion",
                "construido en",
                "antiguedad",
            ],
        )
        .validated(valid_year)
        .converted(to_integer),
        property(
            "cadastralReference",
            String,
            Basic,
            &["referencia catastral", "ref catastral", "catastro"],
        )
        .validated(valid_cadastral_reference)
        .converted(to_cadastral_reference),
        property(
            "street",
            String,
            Basic,
            &["direccion", "calle", "domicilio del inmueble", "via"],
        )
        .validated(non_empty),
        property(
            "addressDetails",
            String,
            Basic,
            &["piso y puerta", "puerta", "escalera", "bloque"],
        ),
        property(
            "postalCode",
            String,
            Basic,
            &["codigo postal", "c p", "cp"],
        )
        .validated(valid_postal_code),
        property("city", String, Basic, &["ciudad", "localidad", "poblacion"]),
        property("municipality", String, Basic, &["municipio", "termino municipal"]),
        property("province", String, Basic, &["provincia"]),
        property(
            "neighborhood",
            String,
            Basic,
            &["barrio", "zona", "distrito"],
        ),
        // -- energy ----------------------------------------------------------
        property(
            "energyCertification",
            String,
            Energy,
            &[
                "calificacion energetica",
                "certificado energetico",
                "clase energetica",
                "eficiencia energetica",
                "letra de consumo",
            ],
        )
        .validated(valid_energy_scale)
        .converted(to_energy_scale),
        property(
            "energyConsumptionValue",
            Number,
            Energy,
            &[
                "consumo de energia",
                "consumo energetico",
                "kwh m2 ano",
                "energia primaria",
            ],
        )
        .validated(valid_energy_value),
        property(
            "emissionsScale",
            String,
            Energy,
            &[
                "escala de emisiones",
                "calificacion de emisiones",
                "letra de emisiones",
            ],
        )
        .validated(valid_energy_scale)
        .converted(to_energy_scale),
        property(
            "emissionsValue",
            Number,
            Energy,
            &["emisiones", "emisiones de co2", "kg co2 m2 ano"],
        )
        .validated(valid_energy_value),
        // -- condition -------------------------------------------------------
        property(
            "conservationStatus",
            String,
            Condition,
            &["estado de conservacion", "estado", "conservacion", "estado del inmueble"],
        )
        .converted(to_conservation_status),
        property(
            "lastRenovationYear",
            Number,
            Condition,
            &["ano de reforma", "ultima reforma", "reformado en"],
        )
        .validated(valid_year)
        .converted(to_integer),
        feature("exterior", Condition, &["exterior", "vivienda exterior"]),
        feature("bright", Condition, &["luminoso", "luz natural", "muy luminoso"]),
        feature("isBankOwned", Condition, &["procedente de banco", "inmueble de banco"]),
        // -- amenities -------------------------------------------------------
        feature("hasElevator", Amenities, &["ascensor", "elevador"]),
        feature(
            "hasGarage",
            Amenities,
            &["garaje", "plaza de garaje", "parking", "aparcamiento"],
        ),
        property(
            "garageSpaces",
            Number,
            Amenities,
            &["plazas de garaje", "numero de plazas de garaje", "plazas de aparcamiento"],
        )
        .validated(valid_small_count)
        .converted(to_integer),
        feature(
            "hasStorageRoom",
            Amenities,
            &["trastero", "cuarto trastero"],
        ),
        feature("terrace", Amenities, &["terraza"]),
        property(
            "terraceSize",
            Number,
            Amenities,
            &["superficie de terraza", "metros de terraza", "m2 de terraza"],
        )
        .validated(valid_area),
        feature("pool", Amenities, &["piscina", "piscina comunitaria"]),
        feature("garden", Amenities, &["jardin", "zona verde"]),
        feature(
            "airConditioning",
            Amenities,
            &["aire acondicionado", "climatizacion"],
        ),
        property(
            "heatingType",
            String,
            Amenities,
            &["calefaccion", "tipo de calefaccion", "sistema de calefaccion"],
        ),
        feature(
            "builtInWardrobes",
            Amenities,
            &["armarios empotrados", "armarios"],
        ),
        feature("disabledAccessible", Amenities, &["adaptado movilidad reducida", "accesible"]),
        // -- kitchen ---------------------------------------------------------
        property(
            "kitchenType",
            String,
            Kitchen,
            &["tipo de cocina", "cocina"],
        ),
        feature(
            "furnishedKitchen",
            Kitchen,
            &["cocina amueblada", "cocina equipada"],
        ),
        feature(
            "openKitchen",
            Kitchen,
            &["cocina abierta", "cocina americana", "cocina office"],
        ),
        feature("pantry", Kitchen, &["despensa"]),
        // -- spaces ----------------------------------------------------------
        property(
            "orientation",
            String,
            Spaces,
            &["orientacion", "orientado a"],
        )
        .converted(to_orientation),
        property(
            "floor",
            String,
            Spaces,
            &["planta", "altura", "numero de planta"],
        ),
        property(
            "totalFloors",
            Number,
            Spaces,
            &["plantas del edificio", "numero de plantas", "total de plantas"],
        )
        .validated(valid_small_count)
        .converted(to_integer),
        property(
            "balconyCount",
            Number,
            Spaces,
            &["balcones", "numero de balcones"],
        )
        .validated(valid_small_count)
        .converted(to_integer),
        feature("laundryRoom", Spaces, &["lavadero", "cuarto de lavado"]),
        feature("study", Spaces, &["despacho", "estudio"]),
        feature("livingRoom", Spaces, &["salon", "salon comedor"]),
        feature("attic", Spaces, &["buhardilla", "altillo"]),
        // -- luxury ----------------------------------------------------------
        feature("jacuzzi", Luxury, &["jacuzzi", "hidromasaje"]),
        feature("sauna", Luxury, &["sauna"]),
        feature("homeAutomation", Luxury, &["domotica", "casa inteligente"]),
        feature(
            "securityGuard",
            Luxury,
            &["conserje", "portero", "vigilancia", "seguridad 24h"],
        ),
        feature("views", Luxury, &["vistas", "vistas al mar", "vistas panoramicas"]),
        feature("gym", Luxury, &["gimnasio"]),
        // -- appliances ------------------------------------------------------
        feature("oven", Appliances, &["horno"]),
        feature("microwave", Appliances, &["microondas"]),
        feature("washingMachine", Appliances, &["lavadora"]),
        feature("fridge", Appliances, &["frigorifico", "nevera"]),
        feature("dishwasher", Appliances, &["lavavajillas"]),
        feature("dryer", Appliances, &["secadora"]),
        feature("television", Appliances, &["television", "tv"]),
        // -- listings --------------------------------------------------------
        listing(
            "listingType",
            String,
            Listing,
            &["tipo de operacion", "operacion", "regimen", "modalidad"],
        )
        .converted(to_listing_type),
        listing(
            "price",
            Decimal,
            Listing,
            &[
                "precio",
                "precio de venta",
                "precio de alquiler",
                "pvp",
                "renta mensual",
            ],
        )
        .validated(valid_price),
        listing(
            "pricePerSquareMeter",
            Decimal,
            Listing,
            &[
                "precio por m2",
                "precio m2",
                "precio por metro cuadrado",
                "euros m2",
            ],
        )
        .validated(valid_price),
        listing(
            "communityFees",
            Decimal,
            Listing,
            &["gastos de comunidad", "comunidad", "cuota de comunidad"],
        )
        .validated(valid_price),
        listing(
            "ibi",
            Decimal,
            Listing,
            &["ibi", "impuesto de bienes inmuebles"],
        )
        .validated(valid_price),
        listing(
            "deposit",
            Decimal,
            Listing,
            &["fianza", "deposito"],
        )
        .validated(valid_price),
        listing(
            "agencyReference",
            String,
            Listing,
            &["referencia", "ref", "referencia del anuncio", "ref anuncio"],
        ),
        listing(
            "description",
            String,
            Listing,
            &["descripcion", "observaciones", "comentarios"],
        ),
        listing("isFurnished", Boolean, Listing, &["amueblado", "mobiliario"]),
        listing(
            "petsAllowed",
            Boolean,
            Listing,
            &["mascotas", "se admiten mascotas", "admite mascotas"],
        ),
        listing(
            "availableFrom",
            String,
            Listing,
            &["disponible desde", "disponibilidad", "fecha de entrada"],
        ),
        // -- contacts --------------------------------------------------------
        contact(
            "firstName",
            String,
            &["nombre", "nombre del propietario", "propietario", "titular"],
        )
        .validated(non_empty),
        contact("lastName", String, &["apellidos", "apellido"]).validated(non_empty),
        contact(
            "email",
            String,
            &["email", "e mail", "correo electronico", "correo"],
        )
        .validated(valid_email)
        .converted(to_email),
        contact(
            "phone",
            String,
            &["telefono", "movil", "tlf", "tel", "telefono de contacto"],
        )
        .validated(valid_phone)
        .converted(to_phone),
        contact(
            "nif",
            String,
            &["dni", "nif", "nie", "documento de identidad"],
        )
        .validated(valid_nif)
        .converted(to_nif),
        contact(
            "additionalInfo",
            String,
            &["notas del contacto", "informacion adicional"],
        ),
    ]
}
