//! The MLA terminal report
//!
//! All figures below are literals fixed by the report author. Rendering the
//! report is a pure function of them, so two runs produce identical bytes.

use crate::config::TextLayout;
use crate::text::bar_chart::render_bar_chart;
use crate::text::table::{render_comparison_table, ComparisonTable};
use crate::types::{ComparisonSeries, Result};
use std::io::Write;

const REPORT_TITLE: &str = "MLA (Multi-head Latent Attention) 性能分析报告";
const REPORT_FOOTER: &str = "报告生成完成";

/// Shared scaling maximum for both latency charts
const LATENCY_CHART_MAX_MS: f64 = 2100.0;
const SPEEDUP_CHART_MAX: f64 = 5.0;

const HEADLINE_METRICS: [&str; 5] = [
    "KV缓存压缩率: 93.3%",
    "内存占用减少: 100GB → 6.7GB",
    "推理速度提升: 5.7倍",
    "压缩比例: 8:1",
    "精度损失: <0.1%",
];

const ADVANTAGES: [(&str, &str); 5] = [
    ("内存效率", "KV缓存减少93.3%，支持更长序列"),
    ("计算效率", "推理速度提升5.7倍"),
    ("带宽优化", "减少GPU内存带宽瓶颈"),
    ("精度保持", "性能损失小于0.1%"),
    ("可扩展性", "支持128K+超长上下文"),
];

const RECOMMENDED_SCENARIOS: [&str; 5] = [
    "长文本生成任务 (>32K tokens)",
    "多轮对话系统",
    "文档级别理解和分析",
    "代码生成和分析",
    "边缘设备部署 (内存受限环境)",
];

/// Projection, latent vector, per-head reconstruction
const ARCHITECTURE_DIAGRAM: &str = r#"
    ┌─────────────────┐     Low-rank      ┌──────────┐    Reconstruction   ┌─────────┐
    │   Original K,V  │    Projection     │  Latent  │    for each head    │ K¹,V¹   │
    │                 │ ───────────────>  │  Vector  │ ─────────────────>  │ K²,V²   │
    │  d_model × seq  │      W_DKV        │ d_c×seq  │       W_UK,W_UV     │  ...    │
    │    (~100GB)     │                   │ (~6.7GB) │                     │ Kⁿ,Vⁿ   │
    └─────────────────┘                   └──────────┘                     └─────────┘
                           ↑                                ↑
                           └──── 93.3% Compression ────────┘
    "#;

/// KV cache size per sequence-length tier, in GB
fn kv_cache_memory() -> ComparisonSeries {
    ComparisonSeries::new("KV缓存", "GB")
        .with_point("4K tokens", 15.6, 1.95)
        .with_point("16K tokens", 62.4, 7.8)
        .with_point("32K tokens", 124.8, 15.6)
        .with_point("128K tokens", 499.2, 62.4)
}

/// Inference latency per application scenario, in ms
fn inference_latency() -> ComparisonSeries {
    ComparisonSeries::new("推理延迟", "ms")
        .with_point("对话生成(8K)", 450.0, 125.0)
        .with_point("文档摘要(32K)", 2100.0, 580.0)
        .with_point("代码生成(16K)", 890.0, 215.0)
}

fn write_banner<W: Write>(out: &mut W, text: &str, layout: &TextLayout) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", layout.banner_rule())?;
    writeln!(out, "{}", text)?;
    writeln!(out, "{}", layout.banner_rule())?;
    Ok(())
}

fn write_section_title<W: Write>(out: &mut W, title: &str, rule: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)?;
    Ok(())
}

fn memory_table(memory: &ComparisonSeries) -> Result<ComparisonTable> {
    let mut table = ComparisonTable::new(["序列长度", "传统MHA", "MLA", "压缩率"]);
    for point in &memory.points {
        table = table.with_row([
            point.label.clone(),
            point.baseline.to_string(),
            point.compressed.to_string(),
            format!("{:.1}%", point.compression_rate()?),
        ]);
    }
    Ok(table)
}

/// Write the complete MLA performance report to `out`
///
/// Sections, in order: memory table, headline metrics, baseline and MLA
/// latency charts, speedup chart, architecture diagram, advantages and
/// recommended scenarios.
pub fn generate_full_report<W: Write>(out: &mut W) -> Result<()> {
    let layout = TextLayout::default();
    log::info!("Generating MLA text report");

    write_banner(out, REPORT_TITLE, &layout)?;

    // 1. Memory
    let memory = kv_cache_memory();
    render_comparison_table(out, "1. KV缓存内存占用对比 (GB)", &memory_table(&memory)?, &layout)?;

    // 2. Headline metrics
    write_section_title(out, "2. DeepSeek-V2 MLA核心性能指标", &layout.section_rule())?;
    for metric in HEADLINE_METRICS {
        writeln!(out, "• {}", metric)?;
    }

    // 3. Latency, both charts on the same scale
    let latency = inference_latency();
    render_bar_chart(
        out,
        "\n3. 推理延迟对比 - 传统MHA",
        &latency.baseline_series("传统MHA").with_max(LATENCY_CHART_MAX_MS),
        &layout,
    )?;
    render_bar_chart(
        out,
        "推理延迟对比 - MLA",
        &latency.compressed_series("MLA").with_max(LATENCY_CHART_MAX_MS),
        &layout,
    )?;

    // 4. Speedup
    render_bar_chart(
        out,
        "4. MLA相对传统MHA的加速倍数",
        &latency.speedups("加速倍数")?.with_max(SPEEDUP_CHART_MAX),
        &layout,
    )?;

    // 5. Architecture
    write_section_title(out, "5. MLA压缩机制示意图", &layout.banner_rule())?;
    writeln!(out, "{}", ARCHITECTURE_DIAGRAM)?;

    // 6. Advantages
    write_section_title(out, "6. MLA关键优势总结", &layout.section_rule())?;
    for (name, description) in ADVANTAGES {
        writeln!(out, "• {}: {}", name, description)?;
    }

    // 7. Scenarios
    write_section_title(out, "7. 最佳应用场景", &layout.section_rule())?;
    for (index, scenario) in RECOMMENDED_SCENARIOS.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, scenario)?;
    }

    write_banner(out, REPORT_FOOTER, &layout)?;
    out.flush()?;
    Ok(())
}

/// Render the full report into a string
pub fn render_full_report() -> Result<String> {
    let mut buf = Vec::new();
    generate_full_report(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
