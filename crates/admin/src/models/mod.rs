//! Domain models for the local catalog.
//!
//! Read models deserialize from BSON documents; write payloads deserialize
//! from request bodies (and seed files).

pub mod product;

pub use product::{
    Image, Metadata, MetadataUpdate, NewImage, NewMetadata, NewProduct, NewTattooDetails,
    NewVariant, Product, ProductAggregate, ProductUpdate, Sale, StatusUpdate, TattooDetails,
    Variant, VariantUpdate,
};
