use crate::chart::ChartConfig;
use crate::error::ChartError;
use crate::RenderOptions;

const CONTAINER_ID: &str = "main";
const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// Emit a standalone HTML page that renders the chart with ECharts.
///
/// The page is the direct counterpart of the original prototype's success
/// callback: a `#main` container, `echarts.init` on it, and a `setOption`
/// call with the serialized configuration.
pub fn render_page(config: &ChartConfig, options: &RenderOptions) -> Result<String, ChartError> {
    let option = serde_json::to_string_pretty(config)
        .map_err(|e| ChartError::Render(format!("failed to serialize chart option: {e}")))?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
    <div id="{id}" style="width: {width}px; height: {height}px;"></div>
    <script src="{cdn}"></script>
    <script>
        var myChart = echarts.init(document.getElementById('{id}'));
        var option = {option};
        myChart.setOption(option);
    </script>
</body>
</html>
"#,
        title = config.title.text,
        id = CONTAINER_ID,
        width = options.width,
        height = options.height,
        cdn = ECHARTS_CDN,
        option = option,
    ))
}
