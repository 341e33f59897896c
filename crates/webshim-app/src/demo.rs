//! Built-in page shown when no content is configured.

pub const DEMO_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>webshim</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 2em; }
  button { margin: 0.2em; }
  #output { margin-top: 1em; font-family: monospace; }
</style>
</head>
<body>
<h1>webshim</h1>
<p>Ticks: <span id="ticks">0</span></p>
<div>
  <button onclick="send({cmd: 'set_title', title: 'Renamed ' + new Date().toLocaleTimeString()})">Set title</button>
  <button onclick="send({cmd: 'fullscreen'})">Fullscreen</button>
  <button onclick="send({cmd: 'maximize'})">Maximize</button>
  <button onclick="send({cmd: 'minimize'})">Minimize</button>
</div>
<div>
  <button onclick="send({cmd: 'color', r: 30, g: 30, b: 46})">Dark</button>
  <button onclick="send({cmd: 'color', r: 250, g: 250, b: 250})">Light</button>
  <button onclick="send({cmd: 'zoom', level: 1.25})">Zoom 125%</button>
  <button onclick="send({cmd: 'zoom', level: 1.0})">Zoom 100%</button>
  <button onclick="send({cmd: 'inject_css', css: 'body { color: #c0392b; }'})">Inject CSS</button>
</div>
<div>
  <button onclick="send({cmd: 'open'})">Open...</button>
  <button onclick="send({cmd: 'save'})">Save...</button>
  <button onclick="send({cmd: 'alert', message: 'Hello from the page'})">Alert</button>
  <button onclick="send({cmd: 'log', message: 'button clicked'})">Log</button>
  <button onclick="send({cmd: 'exit'})">Exit</button>
</div>
<div id="output"></div>
<script>
  function send(command) {
    window.external.invoke(JSON.stringify(command));
  }
  window.webshim = {
    tick: function (n) { document.getElementById('ticks').textContent = n; },
    show: function (text) { document.getElementById('output').textContent = text; }
  };
</script>
</body>
</html>
"#;
