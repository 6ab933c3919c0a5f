//! Seed content for new projects.
//!
//! The preview builder reuses these when a project has no entry component or
//! stylesheet of its own.

/// Id of the seeded entry component file.
pub const APP_JS_ID: &str = "app-js";

/// Id of the seeded stylesheet file.
pub const APP_CSS_ID: &str = "app-css";

pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

/// Welcome screen component with interactive buttons.
pub const DEFAULT_APP_JS: &str = r#"import React from 'react';
import './App.css';

function App() {
  return (
    <div className="App">
      <header className="App-header">
        <h1>Welcome to CipherStudio!</h1>
        <p>Start editing your React components here.</p>
        <div className="button-container">
          <button 
            onClick={() => alert('Hello from CipherStudio!')}
            className="primary-button"
          >
            Click me!
          </button>
          <button 
            onClick={() => alert('Mobile responsive!')}
            className="secondary-button"
          >
            Test Mobile
          </button>
        </div>
        <div className="features">
          <div className="feature-card">
            <h3>📱 Mobile Responsive</h3>
            <p>Works on all devices</p>
          </div>
          <div className="feature-card">
            <h3>⚡ Live Preview</h3>
            <p>See changes instantly</p>
          </div>
          <div className="feature-card">
            <h3>🎨 Modern UI</h3>
            <p>Beautiful interface</p>
          </div>
        </div>
      </header>
    </div>
  );
}

export default App;"#;

/// Stylesheet for [`DEFAULT_APP_JS`].
pub const DEFAULT_APP_CSS: &str = r#".App {
  text-align: center;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
}

.App-header {
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  padding: 20px;
  color: white;
  min-height: 100vh;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  font-size: calc(10px + 2vmin);
}

.App-header h1 {
  margin-bottom: 20px;
  color: #ffffff;
  font-size: clamp(2rem, 5vw, 4rem);
  font-weight: 700;
  text-shadow: 0 2px 4px rgba(0,0,0,0.3);
}

.App-header p {
  margin-bottom: 30px;
  font-size: clamp(1rem, 3vw, 1.5rem);
  opacity: 0.9;
  max-width: 600px;
  line-height: 1.6;
}

.button-container {
  display: flex;
  gap: 15px;
  margin-bottom: 40px;
  flex-wrap: wrap;
  justify-content: center;
}

.primary-button, .secondary-button {
  padding: 12px 24px;
  font-size: 16px;
  border: none;
  border-radius: 8px;
  cursor: pointer;
  font-weight: 600;
  transition: all 0.3s ease;
  min-width: 120px;
}

.primary-button {
  background-color: #007bff;
  color: white;
}

.primary-button:hover {
  background-color: #0056b3;
  transform: translateY(-2px);
  box-shadow: 0 4px 12px rgba(0, 123, 255, 0.3);
}

.secondary-button {
  background-color: transparent;
  color: white;
  border: 2px solid white;
}

.secondary-button:hover {
  background-color: white;
  color: #667eea;
  transform: translateY(-2px);
  box-shadow: 0 4px 12px rgba(255, 255, 255, 0.3);
}

.features {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
  gap: 20px;
  max-width: 800px;
  width: 100%;
  margin-top: 20px;
}

.feature-card {
  background: rgba(255, 255, 255, 0.1);
  padding: 20px;
  border-radius: 12px;
  backdrop-filter: blur(10px);
  border: 1px solid rgba(255, 255, 255, 0.2);
  transition: all 0.3s ease;
}

.feature-card:hover {
  transform: translateY(-5px);
  background: rgba(255, 255, 255, 0.15);
  box-shadow: 0 8px 25px rgba(0, 0, 0, 0.2);
}

.feature-card h3 {
  margin: 0 0 10px 0;
  font-size: 1.2rem;
  color: #ffffff;
}

.feature-card p {
  margin: 0;
  font-size: 0.9rem;
  opacity: 0.8;
}

/* Mobile Responsive Design */
@media (max-width: 768px) {
  .App-header {
    padding: 15px;
  }
  
  .App-header h1 {
    font-size: 2.5rem;
    margin-bottom: 15px;
  }
  
  .App-header p {
    font-size: 1.1rem;
    margin-bottom: 25px;
    padding: 0 10px;
  }
  
  .button-container {
    flex-direction: column;
    align-items: center;
    gap: 10px;
    margin-bottom: 30px;
  }
  
  .primary-button, .secondary-button {
    width: 200px;
    padding: 14px 20px;
  }
  
  .features {
    grid-template-columns: 1fr;
    gap: 15px;
    padding: 0 10px;
  }
  
  .feature-card {
    padding: 15px;
  }
  
  .feature-card h3 {
    font-size: 1.1rem;
  }
}

@media (max-width: 480px) {
  .App-header {
    padding: 10px;
  }
  
  .App-header h1 {
    font-size: 2rem;
  }
  
  .App-header p {
    font-size: 1rem;
  }
  
  .primary-button, .secondary-button {
    width: 180px;
    padding: 12px 16px;
    font-size: 14px;
  }
  
  .features {
    padding: 0 5px;
  }
  
  .feature-card {
    padding: 12px;
  }
}"#;
