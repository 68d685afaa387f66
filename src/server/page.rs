//! The dashboard page.
//!
//! A single static document: the chart element, the hover panel and the
//! diagnostic line. Plotly draws the figure returned by `/api/chart`; every
//! hover posts the point data to `/api/hover` and the response fills both
//! text blocks. Like Dash's `hoverData`, the last hover stays on screen
//! after the pointer leaves the chart.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Fed Funds Target Rate Against FOMC Announcement</title>
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
  <style>
    body { font-family: "Open Sans", verdana, arial, sans-serif; margin: 16px; }
    #fed-funds-chart { width: 100%; height: 560px; }
    #hover-text {
      width: 100%;
      height: 200px;
      padding: 10px;
      background-color: #f0f0f0;
      border-radius: 5px;
      margin-top: 20px;
      overflow-y: auto;
      box-sizing: border-box;
    }
    #hover-text p { margin: 0 0 8px 0; }
    #debug-output { color: #888; font-family: monospace; white-space: pre-wrap; }
  </style>
</head>
<body>
  <h1>Fed Funds Target Rate Against FOMC Announcement</h1>
  <div id="fed-funds-chart"></div>
  <div id="hover-text"></div>
  <div id="debug-output"></div>
  <script>
    const chart = document.getElementById("fed-funds-chart");
    const hoverText = document.getElementById("hover-text");
    const debugOutput = document.getElementById("debug-output");

    function render(response) {
      hoverText.replaceChildren();
      const primary = response.primary;
      if (primary.kind === "detail") {
        for (const line of primary.lines) {
          const p = document.createElement("p");
          p.textContent = line;
          hoverText.appendChild(p);
        }
      } else {
        hoverText.textContent = primary.text;
      }
      debugOutput.textContent = response.diagnostic;
    }

    async function sendHover(data) {
      const body = data === null
        ? "null"
        : JSON.stringify({
            points: data.points.map((p) => ({ x: p.x, y: p.y, customdata: p.customdata })),
          });
      const res = await fetch("/api/hover", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body,
      });
      render(await res.json());
    }

    async function refresh() {
      const res = await fetch("/api/chart");
      const figure = await res.json();
      await Plotly.react(chart, figure.data, figure.layout, { responsive: true });
      chart.on("plotly_hover", (data) => sendHover(data));
    }

    refresh().then(() => sendHover(null)).catch((err) => {
      debugOutput.textContent = "Failed to load chart: " + err;
    });
  </script>
</body>
</html>
"##;
