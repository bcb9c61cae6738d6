//! Global CSS styles for Keepsake.
//!
//! Night sky backgrounds, rose accents, candlelight titles. Every effect
//! class the core writes (`particle`, `hidden`/`visible`, `card-glare`,
//! `float-heart`, `pop-msg`, `active`, ...) is styled here.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* NIGHT (Backgrounds) */
  --night: #0d0a12;
  --night-lighter: #16101d;
  --night-border: #2a1f33;

  /* ROSE (Hearts, Active, Accents) */
  --rose: #ff4d6d;
  --rose-glow: rgba(255, 77, 109, 0.35);
  --blush: #ffb3c1;

  /* CANDLE (Titles, Numbers) */
  --candle: #f6c177;
  --candle-glow: rgba(246, 193, 119, 0.3);

  /* TEXT */
  --text-primary: #fdf6f9;
  --text-secondary: rgba(253, 246, 249, 0.72);
  --text-muted: rgba(253, 246, 249, 0.5);

  /* Typography */
  --font-serif: 'Cormorant Garamond', Georgia, serif;
  --font-sans: 'Inter', 'Segoe UI', system-ui, sans-serif;

  /* Type Scale */
  --text-xs: 0.75rem;
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.125rem;
  --text-xl: 1.5rem;
  --text-2xl: 2rem;
  --text-3xl: 3rem;

  /* Transitions */
  --transition-fast: 150ms ease;
  --transition-normal: 300ms ease;
  --transition-slow: 800ms cubic-bezier(0.4, 0, 0.2, 1);
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
  -moz-osx-font-smoothing: grayscale;
}

body {
  font-family: var(--font-sans);
  background: var(--night);
  color: var(--text-primary);
  line-height: 1.7;
  min-height: 100vh;
  overflow-x: hidden;
}

/* === Navigation === */
.nav-header {
  position: sticky;
  top: 0;
  z-index: 50;
  background: rgba(13, 10, 18, 0.85);
  backdrop-filter: blur(8px);
  border-bottom: 1px solid var(--night-border);
}

.nav-header-inner {
  display: flex;
  align-items: center;
  justify-content: space-between;
  max-width: 1100px;
  margin: 0 auto;
  padding: 0.75rem 1.5rem;
}

.app-title {
  font-family: var(--font-serif);
  font-size: var(--text-xl);
  font-weight: 400;
  color: var(--candle);
  text-shadow: 0 0 20px var(--candle-glow);
}

.nav-links {
  display: flex;
  gap: 1.25rem;
}

.nav-link {
  color: var(--text-secondary);
  text-decoration: none;
  font-size: var(--text-sm);
  letter-spacing: 0.05em;
  transition: color var(--transition-fast);
}

.nav-link:hover,
.nav-link.active {
  color: var(--rose);
}

/* === Page Root === */
.page-root {
  position: relative;
  min-height: calc(100vh - 60px);
  transition: background 1s ease;
}

.page {
  position: relative;
  z-index: 1;
  max-width: 1100px;
  margin: 0 auto;
  padding: 3rem 1.5rem 6rem;
}

.page-title {
  font-family: var(--font-serif);
  font-size: var(--text-3xl);
  font-weight: 400;
  color: var(--candle);
  text-shadow: 0 0 30px var(--candle-glow);
  text-align: center;
  margin-bottom: 2rem;
}

/* === Particle Field === */
#bg-particles {
  position: fixed;
  inset: 0;
  pointer-events: none;
  z-index: 0;
  overflow: hidden;
}

.particle {
  position: absolute;
  border-radius: 50%;
  background: var(--blush);
  box-shadow: 0 0 6px var(--rose-glow);
  opacity: 0;
  animation-name: drift;
  animation-timing-function: linear;
  animation-iteration-count: infinite;
}

@keyframes drift {
  0% { transform: translateY(0); opacity: 0; }
  15% { opacity: 0.8; }
  85% { opacity: 0.8; }
  100% { transform: translateY(-100vh); opacity: 0; }
}

/* === Scroll Reveal === */
.hidden {
  opacity: 0;
  transform: translateY(40px);
  transition: opacity var(--transition-slow), transform var(--transition-slow);
}

.visible {
  opacity: 1;
  transform: translateY(0);
  transition: opacity var(--transition-slow), transform var(--transition-slow);
}

/* === Home === */
.hero {
  text-align: center;
  padding: 6rem 0 4rem;
}

.hero-title {
  font-family: var(--font-serif);
  font-size: 4rem;
  font-weight: 400;
  color: var(--candle);
  text-shadow: 0 0 40px var(--candle-glow);
}

.hero-tagline {
  color: var(--text-secondary);
  font-size: var(--text-lg);
}

.teaser {
  margin: 3rem auto;
  max-width: 640px;
  padding: 2rem;
  border: 1px solid var(--night-border);
  border-radius: 16px;
  background: var(--night-lighter);
  cursor: pointer;
}

.teaser:hover {
  border-color: var(--rose);
}

.teaser-title {
  font-family: var(--font-serif);
  color: var(--rose);
  font-weight: 400;
}

.teaser-blurb {
  color: var(--text-muted);
}

/* === Countdown === */
.countdown {
  text-align: center;
  margin-bottom: 4rem;
}

.countdown-title {
  font-family: var(--font-serif);
  font-weight: 400;
  font-size: var(--text-2xl);
  color: var(--text-secondary);
  margin-bottom: 1.5rem;
}

.countdown-grid {
  display: flex;
  justify-content: center;
  gap: 1.5rem;
}

.countdown-unit {
  display: flex;
  flex-direction: column;
  min-width: 90px;
  padding: 1rem;
  border-radius: 12px;
  background: var(--night-lighter);
  border: 1px solid var(--night-border);
}

.countdown-value {
  font-family: var(--font-serif);
  font-size: var(--text-3xl);
  color: var(--candle);
  font-variant-numeric: tabular-nums;
}

.countdown-label {
  font-size: var(--text-xs);
  text-transform: uppercase;
  letter-spacing: 0.2em;
  color: var(--text-muted);
}

/* === Gallery === */
.shuffle-btn {
  display: block;
  margin: 0 auto 2rem;
  padding: 0.6rem 1.6rem;
  border: 1px solid var(--rose);
  border-radius: 999px;
  background: transparent;
  color: var(--rose);
  font: inherit;
  cursor: pointer;
  transition: background var(--transition-fast), color var(--transition-fast);
}

.shuffle-btn:hover {
  background: var(--rose);
  color: var(--night);
}

.gallery-container {
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  gap: 2rem;
}

.polaroid {
  width: 220px;
  padding: 12px 12px 40px;
  background: #fdfaf5;
  color: #2b2230;
  box-shadow: 0 10px 30px rgba(0, 0, 0, 0.5);
  transition: transform 0.5s ease;
}

.polaroid-photo {
  height: 190px;
  background: linear-gradient(135deg, var(--blush), var(--rose));
  background-size: cover;
  background-position: center;
}

.polaroid-caption {
  margin-top: 0.75rem;
  font-family: var(--font-serif);
  font-size: var(--text-lg);
  text-align: center;
}

/* === Songs === */
.song-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
  gap: 1.5rem;
}

.song-card {
  padding: 1.5rem;
  border-radius: 16px;
  background: var(--night-lighter);
  border: 1px solid var(--night-border);
  cursor: pointer;
}

.song-card:hover {
  border-color: var(--blush);
}

.song-card.active {
  border-color: var(--rose);
  box-shadow: 0 0 25px var(--rose-glow);
}

.song-card.active .song-icon {
  animation: beat 1s ease-in-out infinite;
}

.song-icon {
  display: inline-block;
  font-size: var(--text-2xl);
  color: var(--rose);
}

.song-title {
  font-family: var(--font-serif);
  font-weight: 400;
}

.song-artist {
  color: var(--text-muted);
  font-size: var(--text-sm);
}

/* === Pop Area === */
.pop-area {
  position: relative;
  min-height: 70vh;
  border: 1px dashed var(--night-border);
  border-radius: 24px;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  cursor: crosshair;
  user-select: none;
}

.pop-title {
  font-family: var(--font-serif);
  font-weight: 400;
  font-size: var(--text-2xl);
  color: var(--candle);
}

.pop-hint {
  color: var(--text-muted);
}

.pop-msg {
  position: fixed;
  transform: translate(-50%, -50%) rotate(var(--rnd-rot, 0deg));
  padding: 0.4rem 0.9rem;
  border-radius: 999px;
  background: var(--rose);
  color: var(--night);
  font-weight: 600;
  white-space: nowrap;
  pointer-events: none;
  z-index: 60;
  animation: pop-fly 2s ease-out forwards;
}

@keyframes pop-fly {
  0% { opacity: 0; scale: 0.4; }
  15% { opacity: 1; scale: 1.1; }
  30% { scale: 1; }
  100% { opacity: 0; translate: 0 -60px; }
}

/* === Surprise === */
.surprise {
  min-height: 70vh;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  gap: 1rem;
  overflow: hidden;
}

.heartbeat {
  font-size: 6rem;
  color: var(--rose);
  cursor: pointer;
  text-shadow: 0 0 40px var(--rose-glow);
  animation: beat 1.2s ease-in-out infinite;
}

@keyframes beat {
  0%, 100% { transform: scale(1); }
  15% { transform: scale(1.2); }
  30% { transform: scale(1); }
  45% { transform: scale(1.15); }
}

.surprise-hint {
  color: var(--text-muted);
  font-size: var(--text-sm);
}

.final-msg {
  position: fixed;
  inset: 0;
  display: flex;
  align-items: center;
  justify-content: center;
  text-align: center;
  padding: 2rem;
  pointer-events: none;
}

.final-msg.visible {
  transition: opacity 2s ease, transform 2s ease;
}

.final-title {
  font-family: var(--font-serif);
  font-size: 3.5rem;
  font-weight: 400;
  color: var(--blush);
  text-shadow: 0 0 40px var(--rose-glow);
}

/* === Reasons === */
.reasons-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
  gap: 2rem;
  perspective: 1000px;
}

.reason-card {
  position: relative;
  overflow: hidden;
  padding: 2rem;
  border-radius: 18px;
  background: var(--night-lighter);
  border: 1px solid var(--night-border);
  opacity: 0;
  transform-style: preserve-3d;
  transition: transform 0.15s ease-out, opacity var(--transition-slow);
  cursor: pointer;
}

.reason-card.revealed {
  opacity: 1;
}

.reason-number {
  font-family: var(--font-serif);
  font-size: var(--text-2xl);
  color: var(--candle);
}

.reason-text {
  color: var(--text-secondary);
}

.card-glare {
  position: absolute;
  inset: 0;
  pointer-events: none;
  background: radial-gradient(
    circle at var(--mouse-x, 50%) var(--mouse-y, 50%),
    rgba(255, 255, 255, 0.18),
    transparent 60%
  );
  opacity: 0;
  transition: opacity var(--transition-normal);
}

.reason-card:hover .card-glare {
  opacity: 1;
}

/* === Heart Burst === */
.float-heart {
  position: fixed;
  z-index: 70;
  color: var(--rose);
  pointer-events: none;
  transform: translate(-50%, -50%);
  animation-name: float-up;
  animation-timing-function: ease-out;
  animation-fill-mode: forwards;
}

@keyframes float-up {
  0% { opacity: 1; translate: 0 0; }
  100% { opacity: 0; translate: 0 -120px; }
}
"#;
