//! Generator for `indicators.h`.

use std::path::{Path, PathBuf};

use indigen_core::{FileRules, GeneratedFile, c_string_literal};
use indigen_manifest::{Capability, Indicator, MAX_PARAMS};

use crate::{
    builder::CodeBuilder,
    catalog::Catalog,
    declarations::{Operation, declaration, index_constant},
    files::BuildInfo,
};

/// File name of the public header, relative to the output directory.
pub const HEADER_FILE: &str = "indicators.h";

/// The consolidated public interface.
///
/// Per-indicator declarations follow manifest order; the trailing
/// index enumeration follows name order.
pub struct IndicatorsHeader<'a> {
    catalog: &'a Catalog<'a>,
    build: &'a BuildInfo,
}

impl<'a> IndicatorsHeader<'a> {
    pub fn new(catalog: &'a Catalog<'a>, build: &'a BuildInfo) -> Self {
        Self { catalog, build }
    }

    fn preamble(&self, builder: CodeBuilder) -> CodeBuilder {
        builder
            .line("#pragma once")
            .blank()
            .line(&format!(
                "#define TI_VERSION {}",
                c_string_literal(&self.build.version)
            ))
            .line(&format!("#define TI_BUILD {}", self.build.build))
            .blank()
            .lines([
                "#include <math.h>",
                "#include <assert.h>",
                "#include <string.h>",
                "#include <stdlib.h>",
            ])
            .blank()
            .lines(["#ifdef __cplusplus", "extern \"C\" {", "#endif"])
            .blank()
            .line("#ifdef _WIN32")
            .indent()
            .line("#ifdef BUILDING")
            .indent()
            .line("#define DLLEXPORT __declspec(dllexport)")
            .dedent()
            .line("#else")
            .indent()
            .line("#define DLLEXPORT __declspec(dllimport)")
            .dedent()
            .line("#endif")
            .dedent()
            .line("#else")
            .indent()
            .line("#define DLLEXPORT")
            .dedent()
            .line("#endif")
            .blank()
            .line("#ifndef _WIN32")
            .indent()
            .line("#define DONTOPTIMIZE __attribute__((optimize(\"O0\")))")
            .dedent()
            .line("#else")
            .indent()
            .line("#define DONTOPTIMIZE __pragma(optimize(\"\", off))")
            .dedent()
            .line("#endif")
            .blank()
    }

    fn fixed_api(&self, builder: CodeBuilder) -> CodeBuilder {
        builder
            .lines([
                "DLLEXPORT extern const char* ti_version();",
                "DLLEXPORT extern long int ti_build();",
                "DLLEXPORT extern int ti_indicator_count();",
            ])
            .blank()
            .line("typedef double TI_REAL;")
            .line("enum {TI_OKAY, TI_INVALID_OPTION, TI_OUT_OF_MEMORY};")
            .line("enum {TI_TYPE_OVERLAY=1, TI_TYPE_INDICATOR, TI_TYPE_MATH, TI_TYPE_SIMPLE, TI_TYPE_COMPARATIVE};")
            .line(&format!(
                "#define TI_MAXINDPARAMS {} /* No indicator will use more than this many inputs, options, or outputs. */",
                MAX_PARAMS
            ))
            .blank()
            .lines([
                "struct ti_stream; typedef struct ti_stream ti_stream;",
                "typedef int (*ti_indicator_start_function)(TI_REAL const *options);",
                "typedef int (*ti_indicator_function)(int size, TI_REAL const *const *inputs, TI_REAL const *options, TI_REAL *const *outputs);",
                "typedef int (*ti_indicator_stream_new)(TI_REAL const *options, ti_stream **stream);",
                "typedef int (*ti_indicator_stream_run)(ti_stream *stream, int size, TI_REAL const *const *inputs, TI_REAL *const *outputs);",
                "typedef void (*ti_indicator_stream_free)(ti_stream *stream);",
            ])
            .blank()
            .block_with_close("typedef struct ti_indicator_info {", "} ti_indicator_info;", |b| {
                b.lines([
                    "char *name;",
                    "char *full_name;",
                    "ti_indicator_start_function start;",
                    "ti_indicator_function indicator;",
                    "ti_indicator_function indicator_ref;",
                    "int type, inputs, options, outputs;",
                    "char *input_names[TI_MAXINDPARAMS];",
                    "char *option_names[TI_MAXINDPARAMS];",
                    "char *output_names[TI_MAXINDPARAMS];",
                    "ti_indicator_stream_new stream_new;",
                    "ti_indicator_stream_run stream_run;",
                    "ti_indicator_stream_free stream_free;",
                ])
            })
            .blank()
            .line(&format!("#define TI_INDICATOR_COUNT {}", self.catalog.len()))
            .line("DLLEXPORT extern ti_indicator_info ti_indicators[];")
            .line("DLLEXPORT extern const ti_indicator_info *ti_find_indicator(const char *name);")
            .blank()
            .lines([
                "DLLEXPORT extern int ti_stream_run(ti_stream *stream, int size, TI_REAL const *const *inputs, TI_REAL *const *outputs);",
                "DLLEXPORT extern ti_indicator_info *ti_stream_get_info(ti_stream *stream);",
                "DLLEXPORT extern int ti_stream_get_progress(ti_stream *stream);",
                "DLLEXPORT extern void ti_stream_free(ti_stream *stream);",
            ])
            .blank()
    }

    fn index_enum(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.block_with_close("enum {", "};", |b| {
            b.each(self.catalog.in_name_order().enumerate(), |b, (i, ind)| {
                b.line(&format!("{} = {},", index_constant(&ind.name), i))
            })
        })
    }
}

/// Operations declared for `indicator`, in header order.
pub fn declared_operations(indicator: &Indicator) -> Vec<Operation> {
    let mut ops = Operation::BASE.to_vec();
    for capability in indicator.capabilities.iter() {
        match capability {
            Capability::Reference => ops.push(Operation::ReferenceCompute),
            Capability::Streaming => ops.extend(Operation::STREAMING),
        }
    }
    ops
}

fn name_list(names: &[String]) -> String {
    format!("[{}]", names.join(", "))
}

fn documentation(builder: CodeBuilder, indicator: &Indicator) -> CodeBuilder {
    let options = if indicator.options.is_empty() {
        "none".to_string()
    } else {
        name_list(&indicator.options)
    };

    builder
        .comment(&indicator.name)
        .comment(&format!("Type: {}", indicator.category))
        .comment(&format!(
            "Input arrays: {}    Options: {}    Output arrays: {}",
            indicator.inputs.len(),
            indicator.options.len(),
            indicator.outputs.len()
        ))
        .comment(&format!("Inputs: {}", name_list(&indicator.inputs)))
        .comment(&format!("Options: {}", options))
        .comment(&format!("Outputs: {}", name_list(&indicator.outputs)))
}

fn indicator_section(builder: CodeBuilder, indicator: &Indicator) -> CodeBuilder {
    documentation(builder, indicator)
        .each(declared_operations(indicator), |b, op| {
            b.line(&format!("DLLEXPORT extern {};", declaration(&indicator.name, op)))
        })
        .blank()
}

impl GeneratedFile for IndicatorsHeader<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(HEADER_FILE)
    }

    fn rules(&self) -> FileRules {
        FileRules::generated()
    }

    fn render(&self) -> String {
        let builder = self.preamble(CodeBuilder::c());
        let builder = self.fixed_api(builder);
        let builder = builder.each(self.catalog.in_manifest_order(), indicator_section);

        self.index_enum(builder)
            .blank()
            .lines(["#ifdef __cplusplus", "}", "#endif"])
            .build()
    }
}

#[cfg(test)]
mod tests {
    use indigen_manifest::Category;

    use super::*;

    fn build() -> BuildInfo {
        BuildInfo::new("0.9.2", 1_700_000_000)
    }

    fn indicators() -> Vec<Indicator> {
        vec![
            Indicator::new("sma", "Simple Moving Average", Category::Overlay)
                .inputs(["real"])
                .options(["period"])
                .outputs(["sma"]),
            Indicator::new("ema", "Exponential Moving Average", Category::Overlay)
                .inputs(["real"])
                .options(["period"])
                .outputs(["ema"])
                .capability(Capability::Reference)
                .capability(Capability::Streaming),
            Indicator::new("abs", "Vector Absolute Value", Category::Simple)
                .inputs(["real"])
                .outputs(["abs"]),
        ]
    }

    #[test]
    fn test_declared_operations() {
        let inds = indicators();
        assert_eq!(declared_operations(&inds[0]), Operation::BASE.to_vec());
        assert_eq!(
            declared_operations(&inds[1]),
            vec![
                Operation::Start,
                Operation::Compute,
                Operation::ReferenceCompute,
                Operation::StreamNew,
                Operation::StreamRun,
                Operation::StreamFree,
            ]
        );
    }

    #[test]
    fn test_build_metadata() {
        let inds = indicators();
        let catalog = Catalog::new(&inds).unwrap();
        let build = build();
        let header = IndicatorsHeader::new(&catalog, &build).render();

        assert!(header.starts_with("#pragma once\n"));
        assert!(header.contains("#define TI_VERSION \"0.9.2\"\n"));
        assert!(header.contains("#define TI_BUILD 1700000000\n"));
        assert!(header.contains("#define TI_INDICATOR_COUNT 3\n"));
        assert!(header.contains("#define TI_MAXINDPARAMS 10 "));
    }

    #[test]
    fn test_documentation_block() {
        let inds = indicators();
        let catalog = Catalog::new(&inds).unwrap();
        let build = build();
        let header = IndicatorsHeader::new(&catalog, &build).render();

        assert!(header.contains(
            "/* abs */\n/* Type: simple */\n/* Input arrays: 1    Options: 0    Output arrays: 1 */\n/* Inputs: [real] */\n/* Options: none */\n/* Outputs: [abs] */\n"
        ));
        assert!(header.contains("/* Options: [period] */\n"));
    }

    #[test]
    fn test_sections_follow_manifest_order() {
        let inds = indicators();
        let catalog = Catalog::new(&inds).unwrap();
        let build = build();
        let header = IndicatorsHeader::new(&catalog, &build).render();

        let sma = header.find("/* sma */").unwrap();
        let ema = header.find("/* ema */").unwrap();
        let abs = header.find("/* abs */").unwrap();
        assert!(sma < ema && ema < abs);
    }

    #[test]
    fn test_enum_follows_name_order() {
        let inds = indicators();
        let catalog = Catalog::new(&inds).unwrap();
        let build = build();
        let header = IndicatorsHeader::new(&catalog, &build).render();

        assert!(header.contains(
            "enum {\n    TI_INDICATOR_ABS_INDEX = 0,\n    TI_INDICATOR_EMA_INDEX = 1,\n    TI_INDICATOR_SMA_INDEX = 2,\n};\n"
        ));
    }

    #[test]
    fn test_contents_carry_banner() {
        let inds = indicators();
        let catalog = Catalog::new(&inds).unwrap();
        let build = build();
        let contents = IndicatorsHeader::new(&catalog, &build).contents();

        assert!(contents.starts_with(indigen_core::GENERATED_HEADER));
        assert!(contents.ends_with("#ifdef __cplusplus\n}\n#endif\n"));
    }
}
