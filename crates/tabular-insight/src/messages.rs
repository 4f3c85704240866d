//! Localized text for chart recommendations, insights and reports.

use crate::config::Locale;

fn pick(locale: Locale, english: &str, chinese: &str) -> String {
    match locale {
        Locale::English => english.to_string(),
        Locale::TraditionalChinese => chinese.to_string(),
    }
}

// ============================================================================
// Chart recommendations
// ============================================================================

pub(crate) fn scatter_title(locale: Locale) -> String {
    pick(locale, "Correlation Analysis (Scatter)", "相關性分析 (Scatter)")
}

pub(crate) fn scatter_description(locale: Locale, x: &str, y: &str) -> String {
    match locale {
        Locale::English => format!("Explore the relationship between {x} and {y}"),
        Locale::TraditionalChinese => format!("探索 {x} 與 {y} 之間的關係"),
    }
}

pub(crate) fn bar_title(locale: Locale) -> String {
    pick(locale, "Category Comparison (Bar)", "類別比較 (Bar)")
}

pub(crate) fn bar_description(locale: Locale, category: &str, measure: &str) -> String {
    match locale {
        Locale::English => format!("Compare {measure} grouped by {category}"),
        Locale::TraditionalChinese => format!("比較 {measure} (按 {category} 分組)"),
    }
}

pub(crate) fn line_title(locale: Locale) -> String {
    pick(locale, "Time Trend (Line)", "時間趨勢 (Line)")
}

pub(crate) fn line_description(locale: Locale, measure: &str) -> String {
    match locale {
        Locale::English => format!("Analyze how {measure} changes over time"),
        Locale::TraditionalChinese => format!("分析 {measure} 隨時間的變化"),
    }
}

pub(crate) fn pie_title(locale: Locale) -> String {
    pick(locale, "Distribution (Pie)", "分佈情況 (Pie)")
}

pub(crate) fn pie_description(locale: Locale, category: &str) -> String {
    match locale {
        Locale::English => format!("Share of each {category} value"),
        Locale::TraditionalChinese => format!("{category} 的佔比分佈"),
    }
}

// ============================================================================
// Insights
// ============================================================================

pub(crate) fn large_dataset(locale: Locale, rows: usize) -> String {
    match locale {
        Locale::English => format!(
            "Large dataset detected ({rows} rows). Suitable for reliable statistical modeling."
        ),
        Locale::TraditionalChinese => {
            format!("偵測到大型資料集（{rows} 列）。適合進行可靠的統計建模。")
        }
    }
}

pub(crate) fn small_dataset(locale: Locale, rows: usize) -> String {
    match locale {
        Locale::English => format!(
            "Small dataset ({rows} rows). Consider adding more data for more accurate analysis."
        ),
        Locale::TraditionalChinese => {
            format!("資料集較小（{rows} 列）。建議添加更多資料以獲得更準確的分析。")
        }
    }
}

pub(crate) fn strong_correlation(
    locale: Locale,
    column1: &str,
    column2: &str,
    coefficient: f64,
) -> String {
    let positive = coefficient > 0.0;
    match locale {
        Locale::English => {
            let sign = if positive { "positive" } else { "negative" };
            format!(
                "Strong {sign} correlation found between {column1} and {column2} (coefficient: {coefficient})."
            )
        }
        Locale::TraditionalChinese => {
            let sign = if positive { "正" } else { "負" };
            format!("在 {column1} 和 {column2} 之間發現強{sign}相關（係數：{coefficient}）。")
        }
    }
}

pub(crate) fn high_variance(locale: Locale, column: &str, threshold: f64) -> String {
    match locale {
        Locale::English => format!(
            "{column} shows high variability (coefficient of variation > {threshold}), indicating widely dispersed data points."
        ),
        Locale::TraditionalChinese => format!(
            "{column} 具有高變異（變異係數 > {threshold}），表明資料點分佈較為分散。"
        ),
    }
}

pub(crate) fn loaded_successfully(locale: Locale) -> String {
    pick(
        locale,
        "Data loaded successfully. Use the chart tools to explore further patterns.",
        "資料載入成功。請使用圖表工具探索更多模式。",
    )
}

// ============================================================================
// Report labels
// ============================================================================

/// Headings and field labels of a rendered report.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportLabels {
    pub title: &'static str,
    pub generated_at: &'static str,
    pub source: &'static str,
    pub overview: &'static str,
    pub rows: &'static str,
    pub columns: &'static str,
    pub numeric_columns: &'static str,
    pub column_types: &'static str,
    pub statistics: &'static str,
    pub mean: &'static str,
    pub median: &'static str,
    pub min_max: &'static str,
    pub std_dev: &'static str,
    pub unique: &'static str,
    pub most_frequent: &'static str,
    pub frequency: &'static str,
    pub correlations: &'static str,
    pub recommendations: &'static str,
    pub insights: &'static str,
    pub no_statistics: &'static str,
}

pub(crate) fn report_labels(locale: Locale) -> ReportLabels {
    match locale {
        Locale::English => ReportLabels {
            title: "Data Analysis Report",
            generated_at: "Generated at",
            source: "Source",
            overview: "1. Overview",
            rows: "Rows",
            columns: "Columns",
            numeric_columns: "Numeric columns",
            column_types: "Column types",
            statistics: "2. Key Statistics",
            mean: "Mean",
            median: "Median",
            min_max: "Min / Max",
            std_dev: "Std. deviation",
            unique: "Unique values",
            most_frequent: "Most frequent",
            frequency: "Frequency",
            correlations: "3. Correlations",
            recommendations: "4. Recommended Charts",
            insights: "5. Insights",
            no_statistics: "no usable values",
        },
        Locale::TraditionalChinese => ReportLabels {
            title: "資料分析報告",
            generated_at: "生成時間",
            source: "資料來源",
            overview: "1. 資料概覽",
            rows: "總列數 (Rows)",
            columns: "總欄數 (Columns)",
            numeric_columns: "數值欄位",
            column_types: "欄位類型",
            statistics: "2. 關鍵統計分析",
            mean: "平均值 (Mean)",
            median: "中位數 (Median)",
            min_max: "最小/最大 (Min/Max)",
            std_dev: "標準差 (StdDev)",
            unique: "唯一值 (Unique)",
            most_frequent: "最常見 (Most Freq)",
            frequency: "頻率 (Frequency)",
            correlations: "3. 相關性分析",
            recommendations: "4. 推薦圖表",
            insights: "5. 智慧數據洞察",
            no_statistics: "無可用數值",
        },
    }
}
