//! Generator for `indicators_index.c`: the sorted metadata table, the
//! stream dispatch routines and the lookup function.

use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

use indigen_core::{FileRules, GeneratedFile, c_string_literal, to_upper_snake_case};
use indigen_manifest::{Capability, Indicator};

use crate::{
    builder::CodeBuilder,
    catalog::Catalog,
    declarations::{Operation, symbol},
};

/// File name of the index source, relative to the output directory.
pub const INDEX_FILE: &str = "indicators_index.c";

/// Initializer of the terminating all-zero row.
pub const SENTINEL_ROW: &str = "{0,0,0,0,0,0,0,0,0,{0,0},{0,0},{0,0},0,0,0}";

/// One row of `ti_indicators[]`.
///
/// Function references are kept as symbol names; optional entry points are
/// `None` and emitted as null pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub name: String,
    pub full_name: String,
    pub start: String,
    pub compute: String,
    pub reference: Option<String>,
    /// `TI_TYPE_*` tag
    pub category: String,
    pub inputs: Vec<String>,
    pub options: Vec<String>,
    pub outputs: Vec<String>,
    pub stream_new: Option<String>,
    pub stream_run: Option<String>,
    pub stream_free: Option<String>,
}

impl MetadataRow {
    pub fn from_indicator(indicator: &Indicator) -> Self {
        let name = indicator.name.as_str();
        let streaming = indicator.has(Capability::Streaming);
        let stream_symbol = |op| streaming.then(|| symbol(name, op));

        Self {
            name: name.to_string(),
            full_name: indicator.full_name.clone(),
            start: symbol(name, Operation::Start),
            compute: symbol(name, Operation::Compute),
            reference: indicator
                .has(Capability::Reference)
                .then(|| symbol(name, Operation::ReferenceCompute)),
            category: format!("TI_TYPE_{}", to_upper_snake_case(indicator.category.as_str())),
            inputs: indicator.inputs.clone(),
            options: indicator.options.clone(),
            outputs: indicator.outputs.clone(),
            stream_new: stream_symbol(Operation::StreamNew),
            stream_run: stream_symbol(Operation::StreamRun),
            stream_free: stream_symbol(Operation::StreamFree),
        }
    }

    /// Render the row as a C aggregate initializer.
    pub fn render(&self) -> String {
        let fields = [
            c_string_literal(&self.name),
            c_string_literal(&self.full_name),
            self.start.clone(),
            self.compute.clone(),
            pointer(&self.reference),
            self.category.clone(),
            self.inputs.len().to_string(),
            self.options.len().to_string(),
            self.outputs.len().to_string(),
            name_array(&self.inputs),
            name_array(&self.options),
            name_array(&self.outputs),
            pointer(&self.stream_new),
            pointer(&self.stream_run),
            pointer(&self.stream_free),
        ];
        format!("{{{}}}", fields.join(", "))
    }
}

fn pointer(symbol: &Option<String>) -> String {
    symbol.clone().unwrap_or_else(|| "0".to_string())
}

/// Null-terminated name list, e.g. `{"real", 0}` or `{0}`.
fn name_array(names: &[String]) -> String {
    let items: Vec<String> = names
        .iter()
        .map(|n| c_string_literal(n))
        .chain(std::iter::once("0".to_string()))
        .collect();
    format!("{{{}}}", items.join(", "))
}

/// The metadata rows in name order.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    rows: Vec<MetadataRow>,
}

impl MetadataTable {
    pub fn new(catalog: &Catalog<'_>) -> Self {
        Self {
            rows: catalog.in_name_order().map(MetadataRow::from_indicator).collect(),
        }
    }

    /// Rows without the sentinel.
    pub fn rows(&self) -> &[MetadataRow] {
        &self.rows
    }

    /// Binary search by name, bracketing exactly as the emitted
    /// `ti_find_indicator` does.
    pub fn lookup(&self, name: &str) -> Option<&MetadataRow> {
        let mut imin: isize = 0;
        let mut imax: isize = self.rows.len() as isize - 1;

        while imax >= imin {
            let i = imin + (imax - imin) / 2;
            let row = &self.rows[i as usize];
            match name.as_bytes().cmp(row.name.as_bytes()) {
                Ordering::Equal => return Some(row),
                Ordering::Greater => imin = i + 1,
                Ordering::Less => imax = i - 1,
            }
        }

        None
    }
}

/// The metadata/index translation unit.
pub struct IndicatorsIndex<'a> {
    table: &'a MetadataTable,
}

impl<'a> IndicatorsIndex<'a> {
    pub fn new(table: &'a MetadataTable) -> Self {
        Self { table }
    }
}

impl GeneratedFile for IndicatorsIndex<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(INDEX_FILE)
    }

    fn rules(&self) -> FileRules {
        FileRules::generated()
    }

    fn render(&self) -> String {
        let rows: Vec<String> = self
            .table
            .rows()
            .iter()
            .map(|row| format!("{},", row.render()))
            .chain(std::iter::once(SENTINEL_ROW.to_string()))
            .collect();

        CodeBuilder::c()
            .line("#include \"indicators.h\"")
            .blank()
            .line("const char* ti_version() { return TI_VERSION; }")
            .line("long int ti_build() { return TI_BUILD; }")
            .line("int ti_indicator_count() { return TI_INDICATOR_COUNT; }")
            .blank()
            .block_with_close("struct ti_indicator_info ti_indicators[] = {", "};", |b| {
                b.lines(&rows)
            })
            .blank()
            .block_with_close("struct ti_stream {", "};", |b| {
                b.line("int index;").line("int progress;")
            })
            .blank()
            .block(
                "int ti_stream_run(ti_stream *stream, int size, TI_REAL const *const *inputs, TI_REAL *const *outputs) {",
                |b| b.line("return ti_indicators[stream->index].stream_run(stream, size, inputs, outputs);"),
            )
            .blank()
            .block("ti_indicator_info *ti_stream_get_info(ti_stream *stream) {", |b| {
                b.line("return ti_indicators + stream->index;")
            })
            .blank()
            .block("int ti_stream_get_progress(ti_stream *stream) {", |b| {
                b.line("return stream->progress;")
            })
            .blank()
            .block("void ti_stream_free(ti_stream *stream) {", |b| {
                b.line("ti_indicators[stream->index].stream_free(stream);")
            })
            .blank()
            .block("const ti_indicator_info *ti_find_indicator(const char *name) {", |b| {
                b.line("int imin = 0;")
                    .line("int imax = sizeof(ti_indicators) / sizeof(ti_indicator_info) - 2;")
                    .blank()
                    .comment("Binary search")
                    .block("while (imax >= imin) {", |b| {
                        b.line("const int i = (imin + ((imax-imin)/2));")
                            .line("const int c = strcmp(name, ti_indicators[i].name);")
                            .line("if (c == 0) {")
                            .indent()
                            .line("return ti_indicators + i;")
                            .dedent()
                            .line("} else if (c > 0) {")
                            .indent()
                            .line("imin = i + 1;")
                            .dedent()
                            .line("} else {")
                            .indent()
                            .line("imax = i - 1;")
                            .dedent()
                            .line("}")
                    })
                    .blank()
                    .line("return 0;")
            })
            .build()
    }
}
