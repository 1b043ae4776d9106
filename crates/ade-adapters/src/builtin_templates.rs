//! Compiled-in fallback templates.
//!
//! When a template reference has no file on disk, these defaults keep the
//! stock registry usable out of the box. Token placeholders are rendered by
//! the engine, not here.

const FASTAPI_MAIN: &str = r#"from fastapi import FastAPI
from fastapi.middleware.cors import CORSMiddleware
import os

app = FastAPI(
    title="{{ServiceName}} API",
    description="{{Domain}} domain - {{ServiceName}} service",
    version="1.0.0"
)

app.add_middleware(
    CORSMiddleware,
    allow_origins=["*"],
    allow_credentials=True,
    allow_methods=["*"],
    allow_headers=["*"],
)

@app.get("/")
async def root():
    return {
        "service": "{{serviceName}}",
        "domain": "{{domain}}",
        "status": "healthy",
        "version": "1.0.0"
    }

@app.get("/health")
async def health_check():
    return {"status": "healthy"}

if __name__ == "__main__":
    import uvicorn
    port = int(os.environ.get("PORT", {{port}}))
    uvicorn.run(app, host="0.0.0.0", port=port)
"#;

const FASTAPI_REQUIREMENTS: &str = "fastapi==0.109.2
uvicorn[standard]==0.27.1
pydantic==2.6.1
python-dotenv==1.0.1
";

const FASTAPI_DOCKERFILE: &str = r#"FROM python:3.11-slim

WORKDIR /app

COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt

COPY . .

ENV PORT={{port}}
EXPOSE {{port}}

CMD ["uvicorn", "src.app.main:app", "--host", "0.0.0.0", "--port", "{{port}}"]
"#;

const EXPRESS_INDEX: &str = r#"import express from 'express';
import cors from 'cors';
import dotenv from 'dotenv';

dotenv.config();

const app = express();
const PORT = process.env.PORT || {{port}};

app.use(cors());
app.use(express.json());
app.use(express.urlencoded({ extended: true }));

app.get('/', (req, res) => {
  res.json({
    service: '{{serviceName}}',
    domain: '{{domain}}',
    status: 'healthy',
    version: '1.0.0'
  });
});

app.get('/health', (req, res) => {
  res.json({ status: 'healthy' });
});

app.use((err, req, res, next) => {
  console.error(err.stack);
  res.status(500).json({ error: 'Internal Server Error' });
});

app.listen(PORT, () => {
  console.log(`{{ServiceName}} service listening on port ${PORT}`);
});
"#;

const EXPRESS_PACKAGE_JSON: &str = r#"{
  "name": "{{serviceName}}",
  "version": "1.0.0",
  "type": "module",
  "description": "{{Domain}} domain - {{ServiceName}} service",
  "main": "src/index.mjs",
  "scripts": {
    "start": "node src/index.mjs",
    "dev": "node --watch src/index.mjs",
    "test": "echo \"Error: no test specified\" && exit 1"
  },
  "dependencies": {
    "express": "^4.18.2",
    "cors": "^2.8.5",
    "dotenv": "^16.4.1"
  },
  "devDependencies": {
    "@types/node": "^20.11.0"
  }
}
"#;

const GO_FIBER_MAIN: &str = r#"package main

import (
    "fmt"
    "log"
    "os"

    "github.com/gofiber/fiber/v2"
    "github.com/gofiber/fiber/v2/middleware/cors"
    "github.com/gofiber/fiber/v2/middleware/logger"
)

func main() {
    app := fiber.New(fiber.Config{
        AppName: "{{ServiceName}} v1.0.0",
    })

    app.Use(logger.New())
    app.Use(cors.New())

    app.Get("/", func(c *fiber.Ctx) error {
        return c.JSON(fiber.Map{
            "service": "{{serviceName}}",
            "domain":  "{{domain}}",
            "status":  "healthy",
            "version": "1.0.0",
        })
    })

    app.Get("/health", func(c *fiber.Ctx) error {
        return c.JSON(fiber.Map{
            "status": "healthy",
        })
    })

    port := os.Getenv("PORT")
    if port == "" {
        port = "{{port}}"
    }

    log.Printf("{{ServiceName}} service starting on port %s", port)
    if err := app.Listen(fmt.Sprintf(":%s", port)); err != nil {
        log.Fatal(err)
    }
}
"#;

/// Look up a compiled-in template by its registry reference.
pub fn default_for(reference: &str) -> Option<&'static str> {
    match reference {
        "fastapi/app/main.py" => Some(FASTAPI_MAIN),
        "fastapi/requirements.txt" => Some(FASTAPI_REQUIREMENTS),
        "fastapi/Dockerfile" => Some(FASTAPI_DOCKERFILE),
        "express/src/index.mjs" => Some(EXPRESS_INDEX),
        "express/package.json" => Some(EXPRESS_PACKAGE_JSON),
        "go-fiber/cmd/serviceName/main.go" => Some(GO_FIBER_MAIN),
        _ => None,
    }
}
