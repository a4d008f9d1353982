//! EDMX 4.0 serialization of a metadata graph.

use apidocs_core::{
    ComplexType, EntityContainer, EntityFramework, EntityType, EnumType, Operation, Property,
    Schema,
};
use std::fmt::{self, Write};

const EDMX_NAMESPACE: &str = "http://docs.oasis-open.org/odata/ns/edmx";
const EDM_NAMESPACE: &str = "http://docs.oasis-open.org/odata/ns/edm";

/// Render `graph` as an EDMX document.
pub fn generate_edmx(graph: &EntityFramework) -> String {
    let mut xml = String::new();
    // Writing into a String is infallible.
    let _ = write_edmx(&mut xml, graph);
    xml
}

/// Write `graph` as an EDMX document to `out`.
pub fn write_edmx<W: Write>(out: &mut W, graph: &EntityFramework) -> fmt::Result {
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    writeln!(out, r#"<edmx:Edmx Version="4.0" xmlns:edmx="{EDMX_NAMESPACE}">"#)?;
    writeln!(out, "  <edmx:DataServices>")?;
    for schema in &graph.schemas {
        write_schema(out, schema)?;
    }
    writeln!(out, "  </edmx:DataServices>")?;
    writeln!(out, "</edmx:Edmx>")
}

fn write_schema<W: Write>(out: &mut W, schema: &Schema) -> fmt::Result {
    writeln!(
        out,
        r#"    <Schema Namespace="{}" xmlns="{EDM_NAMESPACE}">"#,
        escape_xml(&schema.namespace)
    )?;

    for enum_type in &schema.enum_types {
        write_enum_type(out, enum_type)?;
    }
    for complex in &schema.complex_types {
        write_complex_type(out, complex)?;
    }
    for entity in &schema.entity_types {
        write_entity_type(out, entity)?;
    }
    for action in &schema.actions {
        write_operation(out, "Action", action)?;
    }
    for function in &schema.functions {
        write_operation(out, "Function", function)?;
    }
    if let Some(container) = &schema.entity_container {
        write_container(out, container)?;
    }

    writeln!(out, "    </Schema>")
}

fn write_enum_type<W: Write>(out: &mut W, enum_type: &EnumType) -> fmt::Result {
    write!(out, r#"      <EnumType Name="{}""#, escape_xml(&enum_type.name))?;
    if let Some(underlying) = &enum_type.underlying_type {
        write!(out, r#" UnderlyingType="{}""#, escape_xml(underlying))?;
    }
    if enum_type.is_flags {
        write!(out, r#" IsFlags="true""#)?;
    }
    writeln!(out, ">")?;

    for member in &enum_type.members {
        write!(out, r#"        <Member Name="{}""#, escape_xml(&member.name))?;
        if let Some(value) = &member.value {
            write!(out, r#" Value="{}""#, escape_xml(value))?;
        }
        writeln!(out, " />")?;
    }

    writeln!(out, "      </EnumType>")
}

/// Attributes shared by complex and entity types.
fn write_structured_attributes<W: Write>(out: &mut W, complex: &ComplexType) -> fmt::Result {
    write!(out, r#" Name="{}""#, escape_xml(&complex.name))?;
    if let Some(base_type) = &complex.base_type {
        write!(out, r#" BaseType="{}""#, escape_xml(base_type))?;
    }
    if complex.open_type {
        write!(out, r#" OpenType="true""#)?;
    }
    if complex.abstract_type {
        write!(out, r#" Abstract="true""#)?;
    }
    Ok(())
}

fn write_complex_type<W: Write>(out: &mut W, complex: &ComplexType) -> fmt::Result {
    write!(out, "      <ComplexType")?;
    write_structured_attributes(out, complex)?;
    writeln!(out, ">")?;
    write_properties(out, &complex.properties)?;
    writeln!(out, "      </ComplexType>")
}

fn write_entity_type<W: Write>(out: &mut W, entity: &EntityType) -> fmt::Result {
    write!(out, "      <EntityType")?;
    write_structured_attributes(out, &entity.complex)?;
    writeln!(out, ">")?;

    if let Some(key) = &entity.key {
        writeln!(out, "        <Key>")?;
        for property in &key.property_refs {
            writeln!(out, r#"          <PropertyRef Name="{}" />"#, escape_xml(property))?;
        }
        writeln!(out, "        </Key>")?;
    }

    write_properties(out, entity.properties())?;

    for navigation in &entity.navigation_properties {
        write!(
            out,
            r#"        <NavigationProperty Name="{}" Type="{}""#,
            escape_xml(&navigation.name),
            escape_xml(&navigation.type_identifier)
        )?;
        if navigation.contains_target {
            write!(out, r#" ContainsTarget="true""#)?;
        }
        if !navigation.nullable {
            write!(out, r#" Nullable="false""#)?;
        }
        writeln!(out, " />")?;
    }

    writeln!(out, "      </EntityType>")
}

fn write_properties<W: Write>(out: &mut W, properties: &[Property]) -> fmt::Result {
    for property in properties {
        write!(
            out,
            r#"        <Property Name="{}" Type="{}""#,
            escape_xml(&property.name),
            escape_xml(&property.type_identifier)
        )?;
        if !property.nullable {
            write!(out, r#" Nullable="false""#)?;
        }
        match &property.description {
            Some(description) => {
                writeln!(out, ">")?;
                writeln!(
                    out,
                    r#"          <Annotation Term="Org.OData.Core.V1.Description" String="{}" />"#,
                    escape_xml(description)
                )?;
                writeln!(out, "        </Property>")?;
            }
            None => writeln!(out, " />")?,
        }
    }
    Ok(())
}

fn write_operation<W: Write>(out: &mut W, element: &str, operation: &Operation) -> fmt::Result {
    write!(out, r#"      <{element} Name="{}""#, escape_xml(&operation.name))?;
    if operation.is_bound {
        write!(out, r#" IsBound="true""#)?;
    }
    if operation.is_composable {
        write!(out, r#" IsComposable="true""#)?;
    }
    writeln!(out, ">")?;

    for parameter in &operation.parameters {
        write!(
            out,
            r#"        <Parameter Name="{}" Type="{}""#,
            escape_xml(&parameter.name),
            escape_xml(&parameter.type_identifier)
        )?;
        if !parameter.nullable {
            write!(out, r#" Nullable="false""#)?;
        }
        writeln!(out, " />")?;
    }
    if let Some(return_type) = &operation.return_type {
        writeln!(out, r#"        <ReturnType Type="{}" />"#, escape_xml(return_type))?;
    }

    writeln!(out, "      </{element}>")
}

fn write_container<W: Write>(out: &mut W, container: &EntityContainer) -> fmt::Result {
    writeln!(
        out,
        r#"      <EntityContainer Name="{}">"#,
        escape_xml(&container.name)
    )?;
    for entity_set in &container.entity_sets {
        writeln!(
            out,
            r#"        <EntitySet Name="{}" EntityType="{}" />"#,
            escape_xml(&entity_set.name),
            escape_xml(&entity_set.entity_type)
        )?;
    }
    for singleton in &container.singletons {
        writeln!(
            out,
            r#"        <Singleton Name="{}" Type="{}" />"#,
            escape_xml(&singleton.name),
            escape_xml(&singleton.type_identifier)
        )?;
    }
    writeln!(out, "      </EntityContainer>")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
