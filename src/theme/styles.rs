//! Global CSS styles for LeafScan.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --void-black: #0a0a0a;
  --void-border: #1a1a1a;

  --moss: #5a7a5a;
  --moss-glow: #7cb87c;

  --cyan: #00d4aa;
  --cyan-glow: rgba(0, 212, 170, 0.3);

  --gold: #d4af37;

  --text-primary: #f5f5f5;
  --text-secondary: rgba(245, 245, 245, 0.7);

  --font-serif: 'Cormorant Garamond', Georgia, serif;
  --font-mono: 'JetBrains Mono', 'SF Mono', 'Consolas', monospace;

  --transition-fast: 150ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  font-size: 16px;
  -webkit-font-smoothing: antialiased;
}

body {
  font-family: var(--font-mono);
  background: var(--void-black);
  color: var(--text-primary);
  line-height: 1.7;
  min-height: 100vh;
}

.page-title {
  font-family: var(--font-serif);
  font-size: 2rem;
  font-weight: 400;
  color: var(--gold);
  letter-spacing: 0.1em;
  text-align: center;
  margin: 1.5rem 0 0.5rem;
}

/* === Upload Widget === */
.upload-widget {
  display: flex;
  flex-direction: column;
  align-items: center;
  padding: 1.5rem;
}

.drop-target {
  display: block;
  padding: 2.5rem;
  border: 2px dashed var(--moss);
  border-radius: 8px;
  color: var(--text-secondary);
  cursor: pointer;
  transition: border-color var(--transition-fast), box-shadow var(--transition-fast);
}

.drop-target:hover,
.drop-target--active {
  border-color: var(--cyan);
  box-shadow: 0 0 16px var(--cyan-glow);
}

.drop-target__input {
  display: none;
}

.upload-preview {
  margin-top: 1rem;
  width: 12rem;
  border-radius: 4px;
}

.classification-panel {
  margin-top: 1rem;
  padding: 1rem;
  border: 1px solid var(--void-border);
  border-radius: 4px;
}

.classification-panel strong {
  color: var(--moss-glow);
  margin-right: 0.25rem;
}
"#;
